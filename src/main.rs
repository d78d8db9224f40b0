//! Fresnel CLI - check answers, sample signals and run the animation headless

use clap::{Parser, Subcommand};
use crossbeam::channel::unbounded;
use fresnel::animation::{AnimationClock, AnimationDriver};
use fresnel::config::FresnelConfig;
use fresnel::exercise::Feedback;
use fresnel::function_display::{display_signal, format_function};
use fresnel::function_parser::parse_function;
use fresnel::phasor::phasor_at;
use fresnel::scene::{Frame, Scene};
use fresnel::waveform::WaveformSampler;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "fresnel")]
#[command(about = "Sinusoidal signals as curves and Fresnel vectors", long_about = None)]
struct Cli {
    /// Configuration file (TOML); defaults apply when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an answer to the vector addition exercise
    Check {
        /// Function like "4.3*sin(314*t + pi/30)", or "-" to read stdin
        function: String,
    },

    /// Print the canonical display of a signal
    Format {
        #[arg(allow_negative_numbers = true)]
        amplitude: f64,
        #[arg(allow_negative_numbers = true)]
        pulsation: f64,
        #[arg(allow_negative_numbers = true)]
        phase: f64,
    },

    /// Sample a function over three periods as CSV
    Sample {
        function: String,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Phasor position of a function at a given time
    Phasor {
        function: String,

        /// Time in seconds (default: 0.0)
        #[arg(short, long, default_value = "0.0")]
        time: f64,
    },

    /// Sum of the reference signals (must share one pulsation)
    Sum,

    /// Run the animation without a display, logging each frame
    Animate {
        /// Number of frames to run (default: 10)
        #[arg(short, long, default_value = "10")]
        frames: usize,

        /// Reference signals to show, by position (e.g. -s 0 -s 1)
        #[arg(short, long)]
        show: Vec<usize>,

        /// Also validate and show this function
        #[arg(long)]
        function: Option<String>,
    },
}

fn read_function(function: String) -> Result<String, Box<dyn std::error::Error>> {
    if function == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(function)
    }
}

fn print_frame(frame: &Frame, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let phasors = frame.diagram.as_ref().map(|d| &d.phasors);
        println!(
            "{}",
            serde_json::json!({ "time": frame.time, "signals": frame.signals, "phasors": phasors })
        );
        return Ok(());
    }

    let mut line = format!("t={:.4}", frame.time);
    if let Some(diagram) = &frame.diagram {
        for (signal, drawing) in frame.signals.iter().zip(&diagram.phasors) {
            line.push_str(&format!(
                "  {}: value={:+.3} tip=({:.1}, {:.1})",
                signal.label,
                signal.params.value(frame.time),
                drawing.state.tip_x,
                drawing.state.tip_y
            ));
        }
    } else {
        line.push_str("  (nothing shown)");
    }
    println!("{}", line);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = FresnelConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { function } => {
            let function = read_function(function)?;
            let mut scene = Scene::from_config(&config)?;
            let feedback = scene.validate(&function);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&feedback)?);
            } else {
                println!("{}", feedback);
            }

            if let Feedback::Error { .. } = feedback {
                std::process::exit(1);
            }
        }

        Commands::Format {
            amplitude,
            pulsation,
            phase,
        } => {
            println!("{}", format_function(amplitude, pulsation, phase));
        }

        Commands::Sample { function, output } => {
            let signal = parse_function(&function)?;
            let samples = WaveformSampler::for_signal(&signal).sample(&signal);

            let mut out: Box<dyn Write> = match &output {
                Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
                None => Box::new(std::io::stdout().lock()),
            };

            if cli.json {
                writeln!(out, "{}", serde_json::to_string(&samples)?)?;
            } else {
                writeln!(out, "t,value")?;
                for sample in &samples {
                    writeln!(out, "{},{}", sample.time, sample.value)?;
                }
            }
            out.flush()?;

            if let Some(path) = output {
                info!("Wrote {} samples to {}", samples.len(), path.display());
            }
        }

        Commands::Phasor { function, time } => {
            let signal = parse_function(&function)?;
            let diagram = config.fresnel_diagram();
            let state = phasor_at(&signal, time, diagram.center(), diagram.scale);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("{}", display_signal(&signal));
                println!("t      = {}", time);
                println!("angle  = {:.4} rad", state.angle);
                println!("radius = {:.2}", state.radius);
                println!("tip    = ({:.2}, {:.2})", state.tip_x, state.tip_y);
            }
        }

        Commands::Sum => {
            let signals = config.reference_signals()?;
            let mut iter = signals.iter().map(|s| s.params);
            let first = iter.next().ok_or("No reference signal configured")?;
            let sum = iter
                .try_fold(first, |acc, s| acc.add_same_pulsation(&s))
                .ok_or("Reference signals do not share one pulsation")?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&sum)?);
            } else {
                println!("{}", display_signal(&sum));
                println!(
                    "a = {:.4}, ω = {:.4} rad/s, φ = {:.4} rad",
                    sum.amplitude, sum.pulsation, sum.phase
                );
            }
        }

        Commands::Animate {
            frames,
            show,
            function,
        } => {
            let mut scene = Scene::from_config(&config)?;
            for index in show {
                if scene.toggle_reference(index).is_none() {
                    return Err(format!("No reference signal at position {}", index).into());
                }
            }
            if let Some(function) = function {
                let feedback = scene.validate(&function);
                if let Feedback::Error { message } = feedback {
                    return Err(message.into());
                }
            }

            let reference = *scene
                .reference_signal()
                .ok_or("No reference signal configured")?;
            let clock = AnimationClock::new(&reference, config.animation.time_step);
            let mut driver = AnimationDriver::new(clock, config.animation.frame_interval());

            let scene = Arc::new(scene);
            let (frame_tx, frame_rx) = unbounded();
            let listener_scene = Arc::clone(&scene);
            driver.subscribe(move |time| {
                let _ = frame_tx.send(listener_scene.frame(time));
            });

            driver.toggle();
            for _ in 0..frames {
                let frame = frame_rx.recv_timeout(Duration::from_secs(5))?;
                print_frame(&frame, cli.json)?;
            }
            driver.toggle();
        }
    }

    Ok(())
}
