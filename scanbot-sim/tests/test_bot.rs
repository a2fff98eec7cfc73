use std::{
    thread,
    time::{Duration, Instant},
};

use assert_approx_eq::assert_approx_eq;
use scanbot::Error;
use scanbot_sim::{Bot, BotConfig, Environment, RotatingLidarConfig};

fn environment() -> Environment {
    let mut env = Environment::new(25.0, 25.0).unwrap();
    env.add_obstacle(2.0, 4.0, 0.5).unwrap();
    env.set_bot_position(2.0, 2.0, 90.0).unwrap();
    env
}

#[test]
fn test_scan_environment() {
    let env = environment();
    let mut bot = Bot::new(BotConfig::default()).unwrap();
    bot.update_environment(&env).unwrap();

    assert!(matches!(
        bot.get_lidar_scan(),
        Err(Error::IllegalState { .. })
    ));
    assert!(!bot.check_obstacles(10.0));

    bot.initialize();
    assert!(bot.is_initialized());

    let scan = bot.scan_environment().unwrap();
    assert_eq!(scan.lidar.len(), 360);
    assert_approx_eq!(scan.lidar[90].distance, 1.5);
    assert_approx_eq!(scan.lidar[180].distance, 2.0);
    // Facing the obstacle at 90°.
    assert_approx_eq!(scan.sonar.distance, 1.5);
    assert!(bot.check_obstacles(2.0));
    assert!(!bot.check_obstacles(1.0));

    bot.shutdown();
    assert!(!bot.is_initialized());
    assert!(bot.get_sonar_distance().is_err());
}

#[test]
fn test_start_requires_initialize() {
    let mut bot = Bot::new(BotConfig::default()).unwrap();
    assert!(matches!(bot.start(None), Err(Error::IllegalState { .. })));
    assert!(!bot.is_running());
}

#[test]
fn test_start_stop() {
    let env = environment();
    let mut bot = Bot::new(BotConfig {
        lidar: RotatingLidarConfig {
            scan_frequency: 20.0,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();
    bot.update_environment(&env).unwrap();
    bot.initialize();

    bot.start(None).unwrap();
    bot.start(None).unwrap();
    assert!(bot.is_running());
    while bot.get_latest_lidar_scan().is_none() {
        thread::sleep(Duration::from_millis(5));
    }

    bot.stop();
    assert!(!bot.is_running());
    bot.stop();
    let latest = bot.get_latest_lidar_scan().unwrap();
    assert_approx_eq!(latest[90].distance, 1.5);

    bot.shutdown();
}

#[test]
fn test_running_follows_scan_thread() {
    let env = environment();
    let mut bot = Bot::new(BotConfig {
        lidar: RotatingLidarConfig {
            scan_frequency: 50.0,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();
    bot.update_environment(&env).unwrap();
    bot.initialize();
    bot.start(None).unwrap();
    assert!(bot.is_running());

    // Disabling the lidar ends the scan thread without going through Bot::stop.
    bot.lidar().stop_scanning();
    let now = Instant::now();
    while bot.is_running() {
        assert!(now.elapsed() < Duration::from_secs(2));
        thread::sleep(Duration::from_millis(5));
    }

    bot.lidar().start_scanning();
    bot.start(None).unwrap();
    assert!(bot.is_running());
    bot.stop();
    assert!(!bot.is_running());
    bot.shutdown();
}

#[test]
fn test_environment_changes_reach_sensors() {
    let mut env = environment();
    let mut bot = Bot::new(BotConfig::default()).unwrap();
    bot.initialize();
    bot.update_environment(&env).unwrap();
    assert_approx_eq!(bot.get_lidar_scan().unwrap()[90].distance, 1.5);

    env.remove_all_obstacles();
    bot.update_environment(&env).unwrap();
    assert_eq!(bot.get_lidar_scan().unwrap()[90].distance, 0.0);
    assert_approx_eq!(bot.get_sonar_distance().unwrap().distance, 4.0);
}

#[test]
fn test_invalid_config() {
    assert!(Bot::new(BotConfig {
        lidar: RotatingLidarConfig {
            resolution: 0,
            ..Default::default()
        },
        ..Default::default()
    })
    .is_err());
}
