//! Integration tests for match logs: ordering, validation, CSV import.

use rally_analysis_web::{MatchLog, MatchLogError, ShotEvent, ShotResult, ShotType};
use uuid::Uuid;

#[test]
fn add_shots_keeps_timestamp_order() {
    let mut log = MatchLog::new("Club night");
    let (p1, p2) = (Uuid::new_v4(), Uuid::new_v4());
    let late = ShotEvent::new(log.id, 2.0, ShotType::Smash, p1, p2, ShotResult::Point);
    let early = ShotEvent::new(log.id, 1.0, ShotType::ShortServe, p2, p1, ShotResult::Continue);
    log.add_shots(vec![late.clone(), early.clone()]).unwrap();

    assert_eq!(log.shots[0].id, early.id);
    assert_eq!(log.shots[1].id, late.id);

    let rallies = log.rallies(Some(p1));
    assert_eq!(rallies.len(), 1);
    assert!(rallies[0].is_win);
    assert_eq!(log.analyze(Some(p1)).total_rallies, 1);
    assert_eq!(log.players().len(), 2);
}

#[test]
fn rejects_wrong_match_duplicates_and_bad_timestamps_atomically() {
    let mut log = MatchLog::new("Ladder");
    let (p1, p2) = (Uuid::new_v4(), Uuid::new_v4());
    let ok = ShotEvent::new(log.id, 0.0, ShotType::LongServe, p1, p2, ShotResult::Continue);
    log.add_shots(vec![ok.clone()]).unwrap();

    let foreign = ShotEvent::new(Uuid::new_v4(), 1.0, ShotType::Clear, p2, p1, ShotResult::Continue);
    assert!(matches!(
        log.add_shots(vec![foreign]),
        Err(MatchLogError::WrongMatch { .. })
    ));

    let fresh = ShotEvent::new(log.id, 1.0, ShotType::Clear, p2, p1, ShotResult::Continue);
    assert_eq!(
        log.add_shots(vec![fresh, ok.clone()]),
        Err(MatchLogError::DuplicateShot(ok.id))
    );

    let nan = ShotEvent::new(log.id, f64::NAN, ShotType::Clear, p2, p1, ShotResult::Continue);
    let nan_id = nan.id;
    assert_eq!(
        log.add_shots(vec![nan]),
        Err(MatchLogError::InvalidTimestamp(nan_id))
    );

    // Nothing from the rejected batches was kept.
    assert_eq!(log.shots.len(), 1);
}

#[test]
fn remove_shot() {
    let mut log = MatchLog::new("");
    assert_eq!(log.name, "Untitled match");
    let (p1, p2) = (Uuid::new_v4(), Uuid::new_v4());
    let shot = ShotEvent::new(log.id, 0.0, ShotType::ShortServe, p1, p2, ShotResult::Continue);
    log.add_shots(vec![shot.clone()]).unwrap();

    assert_eq!(log.remove_shot(shot.id).unwrap().id, shot.id);
    assert_eq!(
        log.remove_shot(shot.id),
        Err(MatchLogError::ShotNotFound(shot.id))
    );
}

#[test]
fn rename_rejects_blank_names() {
    let mut log = MatchLog::new("Old");
    assert_eq!(log.rename("   "), Err(MatchLogError::InvalidName));
    log.rename("  New  ").unwrap();
    assert_eq!(log.name, "New");
}

#[test]
fn import_csv_builds_rallies() {
    let mut log = MatchLog::new("Imported");
    let (p1, p2) = (Uuid::new_v4(), Uuid::new_v4());
    let csv = format!(
        "id,timestamp,shot_type,hit_player,receive_player,result\n\
         ,1,short serve,{p1},{p2},continue\n\
         ,2,net shot,{p2},{p1},\n\
         ,3,kill,{p1},{p2},point\n\
         ,4,long serve,{p2},{p1},continue\n\
         ,5,smash,{p1},{p2},miss\n"
    );

    assert_eq!(log.import_csv(&csv).unwrap(), 5);
    let rallies = log.rallies(Some(p1));
    assert_eq!(rallies.len(), 2);
    assert_eq!(rallies[0].count, 3);
    assert_eq!(rallies[0].winner, Some(p1));
    assert_eq!(rallies[1].serve_type, ShotType::LongServe);
    assert_eq!(rallies[1].winner, Some(p2));

    let report = log.analyze(Some(p1));
    assert_eq!(report.serve_analysis.short_serve.win_rate, 1.0);
    assert_eq!(report.serve_analysis.long_serve.win_rate, 0.0);
}

#[test]
fn import_csv_unknown_shot_type_is_not_a_serve() {
    let mut log = MatchLog::new("Odd tags");
    let (p1, p2) = (Uuid::new_v4(), Uuid::new_v4());
    let csv = format!(
        "id,timestamp,shot_type,hit_player,receive_player,result\n\
         ,1,tweener,{p1},{p2},point\n"
    );
    log.import_csv(&csv).unwrap();
    assert_eq!(log.shots[0].shot_type, ShotType::Unknown);

    let report = log.analyze(None);
    assert_eq!(report.total_rallies, 1);
    assert_eq!(report.serve_analysis.short_serve.count, 0);
    assert_eq!(report.serve_analysis.long_serve.count, 0);
}

#[test]
fn import_csv_reports_bad_line() {
    let mut log = MatchLog::new("Broken");
    let p = Uuid::new_v4();
    let csv = format!(
        "id,timestamp,shot_type,hit_player,receive_player,result\n\
         ,1,short serve,{p},{p},continue\n\
         ,not-a-number,clear,{p},{p},continue\n"
    );
    match log.import_csv(&csv) {
        Err(MatchLogError::Csv { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected CSV error, got {other:?}"),
    }
    assert!(log.shots.is_empty());
}
