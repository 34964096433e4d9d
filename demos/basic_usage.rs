// demos/basic_usage.rs
//! Basic usage example for Gesture Core

use gesture_core::config::ConfigLoader;
use gesture_core::session::{GestureSession, SessionEvent};
use gesture_core::simulation::{StrokeGenerator, StrokeShape};
use gesture_core::utils::time::MockTimeProvider;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Gesture Core Basic Usage Example");
    println!("================================");

    // Load configuration
    println!("Loading configuration...");
    let mut config_loader = ConfigLoader::new();
    let config = config_loader.load()?;
    let summary = config.get_summary();
    println!("Configuration loaded successfully");
    println!("  - {:?}", summary);

    let clock = Arc::new(MockTimeProvider::new(0));
    let mut session = GestureSession::from_config(&config).with_clock(Box::new(Arc::clone(&clock)));
    let interval = session.sequencer().double_tap_interval_ms();
    let mut generator = StrokeGenerator::seeded(2024).with_noise(0.01);

    // Double tap opens a sequence
    println!("\nOpening a capture sequence...");
    session.handle_tap_now();
    clock.advance_by(interval / 2);
    println!("  {:?}", session.handle_tap_now());

    for shape in [StrokeShape::Square, StrokeShape::Triangle] {
        let stroke = generator.generate(shape, 24);
        for point in &stroke {
            session.add_point(point.x, point.y);
        }

        clock.advance_by(interval * 4);
        if let SessionEvent::Recognized(recognition) = session.handle_tap_now() {
            println!(
                "Drew {:<8} -> symbol '{}', command '{}'",
                shape.as_str(),
                recognition.symbol,
                recognition.command
            );
        }
    }

    // Teach a custom gesture and recognize it again
    println!("\nTraining a custom gesture...");
    let zigzag = gesture_core::input::points_from(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
    session.train("zigzag", "undo", &zigzag);
    let recognition = session.recognize(zigzag);
    println!(
        "Trained zigzag -> symbol '{}', command '{}'",
        recognition.symbol, recognition.command
    );

    // Close the sequence with a quick double tap
    clock.advance_by(interval * 4);
    session.handle_tap_now();
    clock.advance_by(interval / 10);
    println!("\nClosing sequence: {:?}", session.handle_tap_now());

    Ok(())
}
