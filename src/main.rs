use anyhow::{Context, Result};
use coulomb_lab::LabConfig;
use coulomb_lab::control::{CommandQueue, LabCommand};
use coulomb_lab::session::LabSession;

fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => LabConfig::load(&path)?,
        None => LabConfig::default(),
    };
    tracing::info!(capacity = config.capacity, "--- Coulomb Lab (headless) ---");

    let field_scale = config.field_scale;
    let potential_norm = config.potential_norm;
    let mut lab = LabSession::new(config);
    let (queue, ui) = CommandQueue::new();

    // A dipole, dragged into place the way the UI would.
    ui.send(LabCommand::AddCharge);
    ui.send(LabCommand::AddCharge);
    lab.drain(&queue);
    let ids: Vec<_> = lab.charges().charges().iter().map(|c| c.id).collect();
    let &[pos, neg] = ids.as_slice() else {
        anyhow::bail!("expected two charges, found {}", ids.len());
    };
    ui.send(LabCommand::SetPosition { id: pos, x: 90.0, y: 150.0 });
    ui.send(LabCommand::SetPosition { id: neg, x: 190.0, y: 150.0 });
    ui.send(LabCommand::SetChargeText { id: neg, text: "-".into() });
    ui.send(LabCommand::SetChargeText { id: neg, text: "-10".into() });
    ui.send(LabCommand::ShowElectricField(true));
    ui.send(LabCommand::ShowPotentialField(true));
    let applied = lab.drain(&queue);
    tracing::info!(applied, "commands applied");

    let start = std::time::Instant::now();
    let frame = lab.frame();
    tracing::info!(elapsed = ?start.elapsed(), "frame computed");

    for m in lab.measurements() {
        println!(
            "Object {}: position ({:.0}, {:.0})  Fx {:.2e} N  Fy {:.2e} N  |F| {:.2e} N",
            m.id, m.display_position.x, m.display_position.y, m.force.x, m.force.y, m.magnitude
        );
    }

    if let Some(field) = &frame.field {
        let longest = field
            .iter()
            .map(|s| (s.endpoint(field_scale) - s.position).length())
            .fold(0.0, f64::max);
        println!("Field arrows: {} (longest {:.1})", field.len(), longest);
    }
    if let Some(potential) = &frame.potential {
        let saturated = potential
            .iter()
            .filter(|s| s.intensity(potential_norm) >= 1.0)
            .count();
        println!("Potential cells: {} ({} saturated)", potential.len(), saturated);
    }

    let snapshot = lab.snapshot("headless")?;
    println!("{}", snapshot.to_ron().context("failed to encode snapshot")?);
    Ok(())
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
