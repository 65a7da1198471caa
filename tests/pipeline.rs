use shepherding_lib::core::config::AppConfig;
use shepherding_lib::data::{SheepRecord, ShepherdRecord};
use shepherding_lib::io::history::{PARAMETERS_FILE, SHEEP_LOG, SHEPHERD_LOG};
use shepherding_lib::io::{read_tick_log, RunParameters, TickLog};
use shepherding_lib::{load_config, Simulation};
use std::io::Write;

fn small_config(dir: &std::path::Path, ticks: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.seed = Some(21);
    config.world.n_sheep = 5;
    config.world.n_shepherd = 2;
    config.world.max_ticks = ticks;
    config.output.enabled = true;
    config.output.dir = dir.display().to_string();
    config
}

#[test]
fn test_run_writes_one_line_per_tick() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run");
    let mut sim = Simulation::from_config(small_config(&out, 40)).unwrap();
    let summary = sim.run().unwrap();
    assert_eq!(summary.ticks, 40);

    let sheep: TickLog<SheepRecord> = read_tick_log(out.join(SHEEP_LOG)).unwrap();
    assert_eq!(sheep.ticks.len(), 40);
    assert_eq!(sheep.skipped, 0);
    for (tick, records) in sheep.ticks.iter().enumerate() {
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.tick == tick as u64));
    }

    let herders: TickLog<ShepherdRecord> = read_tick_log(out.join(SHEPHERD_LOG)).unwrap();
    assert_eq!(herders.ticks.len(), 40);
    assert_eq!(herders.ticks[0].len(), 2);

    let params = RunParameters::load(out.join(PARAMETERS_FILE)).unwrap();
    assert_eq!(params.seed, 21);
    assert_eq!(params.n_shepherd, 2);
}

#[test]
fn test_final_logged_positions_match_world() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run");
    let mut sim = Simulation::from_config(small_config(&out, 10)).unwrap();
    sim.run().unwrap();

    let sheep: TickLog<SheepRecord> = read_tick_log(out.join(SHEEP_LOG)).unwrap();
    let last = sheep.ticks.last().unwrap();
    for (record, live) in last.iter().zip(&sim.world.sheep) {
        assert_eq!(record.id, live.id);
        assert!((record.x - live.body.position.x).abs() <= 0.005 + 1e-9);
        assert!((record.y - live.body.position.y).abs() <= 0.005 + 1e-9);
        assert_eq!(record.state, live.state);
    }
}

#[test]
fn test_truncated_log_is_read_partially() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run");
    let mut sim = Simulation::from_config(small_config(&out, 5)).unwrap();
    sim.run().unwrap();

    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(out.join(SHEEP_LOG))
        .unwrap();
    write!(file, "[{{\"tick\":5,\"id\":0,\"x\":1.0").unwrap();
    drop(file);

    let sheep: TickLog<SheepRecord> = read_tick_log(out.join(SHEEP_LOG)).unwrap();
    assert_eq!(sheep.ticks.len(), 5);
    assert_eq!(sheep.skipped, 1);
}

#[test]
fn test_file_bridge_moves_shepherd_and_publishes() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("agent_list.json");
    let output = dir.path().join("virtual_robot.json");
    std::fs::write(&input, r#"[{"ID": "0", "x0": "450.0", "x1": "460.0"}]"#).unwrap();

    let mut config = AppConfig::default();
    config.world.seed = Some(4);
    config.world.n_sheep = 3;
    config.world.max_ticks = 1;
    config.bridge.enabled = true;
    config.bridge.input = input.display().to_string();
    config.bridge.output = output.display().to_string();

    let mut sim = Simulation::from_config(config).unwrap();
    let report = sim.tick().unwrap();
    assert_eq!(report.reports.len(), 1);

    let h = &sim.world.shepherds[0];
    let dx = h.body.position.x - 450.0;
    let dy = h.body.position.y - 460.0;
    assert!(dx.hypot(dy) <= 2.5 + 1e-9);

    let written: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0]["id"], 0);
    assert_eq!(written[0]["type"], "shepherd");
    let mode = written[0]["mode"].as_str().unwrap();
    assert!(mode == "driving" || mode == "collecting");
}

#[test]
fn test_bridge_without_input_file_keeps_running() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.world.seed = Some(4);
    config.world.n_sheep = 3;
    config.world.max_ticks = 3;
    config.bridge.enabled = true;
    config.bridge.input = dir.path().join("absent.json").display().to_string();
    config.bridge.output = dir.path().join("out.json").display().to_string();

    let mut sim = Simulation::from_config(config).unwrap();
    let summary = sim.run().unwrap();
    assert_eq!(summary.ticks, 3);
    assert!(dir.path().join("out.json").exists());
}

#[test]
fn test_toml_config_round_trip_through_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[world]
n_sheep = 7
seed = 5

[network]
strategy = "voronoi"

[shepherd]
l3 = 120.0
"#,
    )
    .unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.world.n_sheep, 7);
    assert_eq!(config.world.seed, Some(5));
    assert_eq!(config.shepherd.l3, 120.0);
    assert_eq!(config.sheep.radius, AppConfig::default().sheep.radius);
}

#[test]
fn test_loader_rejects_bad_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[shepherd]\ncollection_threshold = 4.0\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Collection threshold"));
}
