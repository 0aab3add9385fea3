use coulomb_lab::control::{CommandQueue, LabCommand};
use coulomb_lab::input::ChargeInput;
use coulomb_lab::session::LabSession;
use coulomb_lab::{LabConfig, LabError, compute_forces};
use glam::DVec2;

fn session_with(n: usize) -> LabSession {
    let mut lab = LabSession::default();
    for _ in 0..n {
        lab.apply(LabCommand::AddCharge).unwrap();
    }
    lab
}

#[test]
fn test_layers_are_computed_only_when_shown() {
    let mut lab = session_with(2);
    let frame = lab.frame();
    assert_eq!(frame.forces.len(), 2);
    assert!(frame.field.is_none());
    assert!(frame.potential.is_none());

    lab.apply(LabCommand::ShowElectricField(true)).unwrap();
    lab.apply(LabCommand::ShowPotentialField(true)).unwrap();
    let frame = lab.frame();
    assert_eq!(frame.field.as_ref().map(Vec::len), Some(10 * 11));
    assert_eq!(frame.potential.as_ref().map(Vec::len), Some(25 * 27));

    lab.apply(LabCommand::ShowElectricField(false)).unwrap();
    assert!(lab.frame().field.is_none());
}

#[test]
fn test_frame_tracks_every_mutation() {
    let mut lab = session_with(2);
    let ids: Vec<_> = lab.charges().charges().iter().map(|c| c.id).collect();

    // Both start stacked on the default spot.
    assert_eq!(lab.frame().forces[0].magnitude, 0.0);

    lab.apply(LabCommand::SetPosition { id: ids[1], x: 150.0, y: 50.0 }).unwrap();
    let moved = lab.frame();
    assert!(moved.forces[0].magnitude > 0.0);
    assert_eq!(moved.forces, compute_forces(lab.charges().charges()));

    lab.apply(LabCommand::TogglePolarity(ids[1])).unwrap();
    let flipped = lab.frame();
    assert_eq!(flipped.forces[0].force, -moved.forces[0].force);
}

#[test]
fn test_pending_text_never_reaches_charges() {
    let mut lab = session_with(1);
    let id = lab.charges().id_at(0).unwrap();

    for text in ["", "-"] {
        lab.apply(LabCommand::SetChargeText { id, text: text.into() }).unwrap();
        assert_eq!(lab.charges().get(id).unwrap().q, 10.0);
        assert_eq!(lab.charge_input(id), Ok(ChargeInput::Pending(text.into())));
    }

    lab.apply(LabCommand::SetChargeText { id, text: "-4.5".into() }).unwrap();
    assert_eq!(lab.charges().get(id).unwrap().q, -4.5);
    assert_eq!(lab.charge_input(id), Ok(ChargeInput::Committed(-4.5)));
}

#[test]
fn test_toggle_discards_pending_text() {
    let mut lab = session_with(1);
    let id = lab.charges().id_at(0).unwrap();
    lab.apply(LabCommand::SetChargeText { id, text: "-".into() }).unwrap();
    lab.apply(LabCommand::TogglePolarity(id)).unwrap();
    assert_eq!(lab.charge_input(id), Ok(ChargeInput::Committed(-10.0)));
}

#[test]
fn test_remove_by_card_index_drops_pending_text() {
    let mut lab = session_with(3);
    let ids: Vec<_> = lab.charges().charges().iter().map(|c| c.id).collect();
    lab.apply(LabCommand::SetChargeText { id: ids[1], text: "".into() }).unwrap();

    lab.apply(LabCommand::RemoveCharge(1)).unwrap();
    assert_eq!(lab.charges().len(), 2);
    assert_eq!(lab.charge_input(ids[1]), Err(LabError::UnknownCharge(ids[1])));
    assert_eq!(lab.charge_input(ids[2]), Ok(ChargeInput::Committed(10.0)));
}

#[test]
fn test_drain_applies_in_order_and_skips_stale_ids() {
    let mut lab = LabSession::default();
    let (queue, ui) = CommandQueue::new();

    for _ in 0..6 {
        ui.send(LabCommand::AddCharge);
    }
    ui.send(LabCommand::RemoveCharge(0));
    ui.send(LabCommand::RemoveCharge(10));
    assert_eq!(lab.drain(&queue), 7);
    assert_eq!(lab.charges().len(), 4);

    let first = lab.charges().id_at(0).unwrap();
    ui.send(LabCommand::ClearCharges);
    ui.send(LabCommand::SetPosition { id: first, x: 0.0, y: 0.0 });
    ui.send(LabCommand::AddCharge);
    assert_eq!(lab.drain(&queue), 2);
    assert_eq!(lab.charges().len(), 1);
    assert_ne!(lab.charges().id_at(0), Some(first));
}

#[test]
fn test_measurements_use_bottom_left_origin() {
    let mut lab = session_with(1);
    let id = lab.charges().id_at(0).unwrap();
    lab.apply(LabCommand::SetPosition { id, x: 40.0, y: 100.0 }).unwrap();

    let m = lab.measurements();
    assert_eq!(m.len(), 1);
    assert_eq!(m[0].display_position, DVec2::new(40.0, 320.0 - 100.0 - 20.0));
}

#[test]
fn test_resize_changes_plot_width() {
    let mut lab = session_with(1);
    lab.apply(LabCommand::ResizeCanvas { width: 600.0, height: 260.0 }).unwrap();
    assert_eq!(lab.plot_size(), (600.0, 320.0));
    assert_eq!(lab.field_grid().len(), 20 * 11);
}

#[test]
fn test_snapshot_records() {
    let lab = LabSession::default();
    assert_eq!(lab.snapshot("empty"), Err(LabError::EmptyExperiment));

    let mut lab = session_with(2);
    let second = lab.charges().id_at(1).unwrap();
    lab.apply(LabCommand::SetPosition { id: second, x: 80.0, y: 90.0 }).unwrap();

    let snapshot = lab.snapshot("run-1").unwrap();
    let forces = lab.forces();
    assert_eq!(snapshot.session, "run-1");
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.records[1].distance, (80.0_f64 * 80.0 + 90.0 * 90.0).sqrt());
    assert_eq!(snapshot.records[0].force, forces[0].magnitude);
}

#[test]
fn test_config_capacity_is_respected() {
    let config = LabConfig {
        capacity: 2,
        ..LabConfig::default()
    };
    let mut lab = LabSession::new(config);
    for _ in 0..4 {
        lab.apply(LabCommand::AddCharge).unwrap();
    }
    assert_eq!(lab.charges().len(), 2);
}

#[test]
fn test_nan_drag_leaves_records_finite() {
    let mut lab = session_with(2);
    let id = lab.charges().id_at(0).unwrap();
    assert!(matches!(
        lab.apply(LabCommand::SetPosition { id, x: f64::NAN, y: 10.0 }),
        Err(LabError::NonFinitePosition { .. })
    ));

    assert!(lab.measurements().iter().all(|m| m.display_position.is_finite()));
    let snapshot = lab.snapshot("nan-drag").unwrap();
    assert!(snapshot.records.iter().all(|r| r.distance.is_finite()));
}

#[test]
fn test_drag_burst_lands_on_last_position() {
    let mut lab = session_with(2);
    let (queue, ui) = CommandQueue::new();
    let ids: Vec<_> = lab.charges().charges().iter().map(|c| c.id).collect();

    for step in 1..=5 {
        let x = 20.0 * f64::from(step);
        ui.send(LabCommand::SetPosition { id: ids[0], x, y: 30.0 });
    }
    ui.send(LabCommand::SetPosition { id: ids[1], x: 60.0, y: 60.0 });
    assert_eq!(lab.drain(&queue), 2);

    let moved = lab.charges().get(ids[0]).unwrap();
    assert_eq!(moved.position.x, 100.0);
    assert_eq!(moved.position.y, 30.0);
    assert_eq!(lab.charges().get(ids[1]).unwrap().position.x, 60.0);
}
