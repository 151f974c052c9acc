//! Prints the discretized outline of a few sample shapes.
//!
//! Usage:
//! ```text
//! cargo run --example outline                        # rounded square
//! cargo run --example outline -- slot                # two arcs joined by straight edges
//! RUST_LOG=polyround=trace cargo run --example outline
//! ```

use polyround::{PolygonBuilder, PolyroundError};

fn rounded_square(b: &mut PolygonBuilder) -> Result<(), PolyroundError> {
    let r = 1.0;
    for (x, y, smooth) in [
        (r, 0.0, false),
        (r, r, true),
        (0.0, r, false),
        (-r, r, true),
        (-r, 0.0, false),
        (-r, -r, true),
        (0.0, -r, false),
        (r, -r, true),
    ] {
        let id = b.add_xy(x, y);
        if smooth {
            b.smooth(id, r, 4)?;
        }
    }
    Ok(())
}

fn slot(b: &mut PolygonBuilder) -> Result<(), PolyroundError> {
    let first = b.add_xy(-2.0, -1.0);
    b.add_xy(2.0, -1.0);
    let right = b.add_xy(2.0, 1.0);
    b.arc(right, 1.0, 8)?;
    b.add_xy(-2.0, 1.0);
    // The closing edge back to the first point is the left end cap.
    b.arc(first, 1.0, 8)
}

fn main() -> Result<(), PolyroundError> {
    // Default: WARN for everything, INFO for polyround.
    // Override with RUST_LOG env var (e.g. RUST_LOG=polyround=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("polyround=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let shape = std::env::args().nth(1).unwrap_or_else(|| "square".to_owned());
    let mut builder = PolygonBuilder::new();
    match shape.as_str() {
        "slot" => slot(&mut builder)?,
        _ => rounded_square(&mut builder)?,
    }

    let verts = builder.to_vecs()?;
    println!(
        "{shape}: {} control points -> {} vertices (clockwise: {})",
        builder.len(),
        verts.len(),
        builder.is_clockwise()
    );
    for v in &verts {
        println!("{:>10.5} {:>10.5}", v.x, v.y);
    }
    Ok(())
}
