//! Integration tests for catalog loading
//!
//! Datasets are authored with `DatasetBuilder`, serialized to bytes and
//! loaded back through the same path the service uses.

mod common;

use common::LogCapture;
use cta_common::catalog::{discography, fallback_sides, CatalogOrigin, DatasetSource, FallbackReason};
use cta_common::db::{CreditTarget, DatasetBuilder, NewSession, NewSide, NewTrack};
use cta_common::Catalog;

fn side(letter: &str, filename: &str, album: &str) -> NewSide {
    NewSide {
        side_letter: letter.into(),
        filename: filename.into(),
        album_title: Some(album.into()),
        main_artist: Some("Bill Monroe & His Blue Grass Boys".into()),
        genre: Some("Bluegrass".into()),
        ..Default::default()
    }
}

fn track(sequence: i64, title: &str, min: i64, sec: i64) -> NewTrack {
    NewTrack {
        sequence_order: Some(sequence),
        title: Some(title.into()),
        counter_start: Some(0),
        duration_min: Some(min),
        duration_sec: Some(sec),
        ..Default::default()
    }
}

/// Tape 013 side A: one session, two tracks, one session-level credit
async fn scenario_a(builder: &DatasetBuilder) {
    let tape = builder.tape("013", None).await.unwrap();
    let side_id = builder
        .side(tape, side("A", "Tape013A", "The Best of Bluegrass 1940-1941"))
        .await
        .unwrap();
    let session = builder
        .session(
            side_id,
            NewSession {
                session_code: Some("October 1940 Session".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    builder
        .track(session, track(1, "Mule Skinner Blues", 2, 48))
        .await
        .unwrap();
    builder
        .track(session, track(2, "Six White Horses", 2, 52))
        .await
        .unwrap();
    let monroe = builder.personnel("Bill Monroe", Some("Mandolin")).await.unwrap();
    builder
        .credit(monroe, CreditTarget::Session(session), Some("Mandolin, Vocals"), Some("a"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_session_credit_projection() {
    let builder = DatasetBuilder::new().await.unwrap();
    scenario_a(&builder).await;
    let catalog = Catalog::from_bytes(&builder.finish().await.unwrap()).await;

    assert_eq!(catalog.origin(), &CatalogOrigin::Dataset);
    assert_eq!(catalog.sides().len(), 1);

    let side = &catalog.sides()[0];
    assert_eq!(side.filename, "Tape013A");
    assert_eq!(side.sessions.len(), 1);

    let personnel = &side.sessions[0].session_personnel;
    assert_eq!(personnel.len(), 1);
    assert_eq!(personnel[0].name, "Bill Monroe");
    assert_eq!(personnel[0].role, "Mandolin, Vocals");

    assert_eq!(side.sessions[0].tracks.len(), 2);
    assert!(side.tracks().all(|t| t.track_specific_credits.is_none()));
}

#[tokio::test]
async fn test_session_credit_applies_to_every_track() {
    let builder = DatasetBuilder::new().await.unwrap();
    scenario_a(&builder).await;
    let catalog = Catalog::from_bytes(&builder.finish().await.unwrap()).await;

    let monroe = discography(catalog.sides(), "Bill Monroe").unwrap();
    assert_eq!(monroe.total_tracks, 2);
    let titles: Vec<&str> = monroe.albums[0]
        .appearances
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Mule Skinner Blues", "Six White Horses"]);
}

#[tokio::test]
async fn test_zero_byte_buffer_falls_back() {
    let catalog = Catalog::from_bytes(&[]).await;
    assert!(matches!(
        catalog.origin(),
        CatalogOrigin::Fallback(FallbackReason::Open(_))
    ));
    assert_eq!(catalog.sides(), fallback_sides().as_slice());
}

#[tokio::test]
async fn test_zero_byte_buffer_logs_fallback_warning() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let catalog = Catalog::from_bytes(&[]).await;
    assert!(catalog.is_fallback());

    let warnings = logs.lines_at("WARN");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Falling back to built-in cassette data"));
    assert!(warnings[0].contains("empty buffer"));
}

#[tokio::test]
async fn test_dataset_load_logs_no_warning() {
    let builder = DatasetBuilder::new().await.unwrap();
    scenario_a(&builder).await;
    let bytes = builder.finish().await.unwrap();

    let logs = LogCapture::default();
    let _guard = logs.install();

    let catalog = Catalog::from_bytes(&bytes).await;
    assert!(!catalog.is_fallback());
    assert!(logs.lines_at("WARN").is_empty());
    assert!(logs
        .lines_at("INFO")
        .iter()
        .any(|line| line.contains("Loaded cassette sides: 1")));
}

#[tokio::test]
async fn test_sides_ordered_by_tape_number() {
    let builder = DatasetBuilder::new().await.unwrap();
    let tape_027 = builder.tape("027", None).await.unwrap();
    let tape_013 = builder.tape("013", None).await.unwrap();
    builder
        .side(tape_027, side("A", "Tape027A", "Jazz at the Philharmonic"))
        .await
        .unwrap();
    builder
        .side(tape_013, side("B", "Tape013B", "The Best of Bluegrass 1940-1941"))
        .await
        .unwrap();
    builder
        .side(tape_013, side("A", "Tape013A", "The Best of Bluegrass 1940-1941"))
        .await
        .unwrap();

    let catalog = Catalog::from_bytes(&builder.finish().await.unwrap()).await;
    let filenames: Vec<&str> = catalog.sides().iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(filenames, vec!["Tape013A", "Tape013B", "Tape027A"]);
}

#[tokio::test]
async fn test_projection_is_deterministic() {
    let builder = DatasetBuilder::new().await.unwrap();
    scenario_a(&builder).await;
    let bytes = builder.finish().await.unwrap();

    let first = serde_json::to_vec(Catalog::from_bytes(&bytes).await.sides()).unwrap();
    let second = serde_json::to_vec(Catalog::from_bytes(&bytes).await.sides()).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_track_credits_are_exclusive() {
    let builder = DatasetBuilder::new().await.unwrap();
    let tape = builder.tape("065", None).await.unwrap();
    let side_id = builder
        .side(tape, side("A", "Tape065A", "Hot Five & Hot Seven"))
        .await
        .unwrap();
    let session = builder.session(side_id, NewSession::default()).await.unwrap();
    let muskrat = builder
        .track(session, track(1, "Muskrat Ramble", 2, 58))
        .await
        .unwrap();
    builder
        .track(session, track(2, "Heebie Jeebies", 2, 52))
        .await
        .unwrap();

    let armstrong = builder.personnel("Louis Armstrong", Some("Cornet")).await.unwrap();
    let ory = builder.personnel("Kid Ory", Some("Trombone")).await.unwrap();
    builder
        .credit(armstrong, CreditTarget::Session(session), None, Some("LA"))
        .await
        .unwrap();
    builder
        .credit(ory, CreditTarget::Track(muskrat), Some("Trombone solo"), None)
        .await
        .unwrap();

    let catalog = Catalog::from_bytes(&builder.finish().await.unwrap()).await;
    let session = &catalog.sides()[0].sessions[0];

    // Session credit role falls back to the default instrument
    assert_eq!(session.session_personnel.len(), 1);
    assert_eq!(session.session_personnel[0].name, "Louis Armstrong");
    assert_eq!(session.session_personnel[0].role, "Cornet");
    assert_eq!(session.session_personnel[0].source_key, "LA");

    let credits = session.tracks[0].track_specific_credits.as_ref().unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].name, "Kid Ory");
    assert_eq!(credits[0].role, "Trombone solo");
    assert!(session.tracks[1].track_specific_credits.is_none());

    let json = serde_json::to_value(&session.tracks[1]).unwrap();
    assert!(json.get("track_specific_credits").is_none());
}

#[tokio::test]
async fn test_valid_but_empty_dataset_falls_back() {
    let builder = DatasetBuilder::new().await.unwrap();
    builder.tape("013", None).await.unwrap();
    let catalog = Catalog::from_bytes(&builder.finish().await.unwrap()).await;

    assert_eq!(
        catalog.origin(),
        &CatalogOrigin::Fallback(FallbackReason::Empty)
    );
    assert_eq!(catalog.sides(), fallback_sides().as_slice());
}

#[tokio::test]
async fn test_truncated_buffer_falls_back() {
    let builder = DatasetBuilder::new().await.unwrap();
    scenario_a(&builder).await;
    let bytes = builder.finish().await.unwrap();

    let catalog = Catalog::from_bytes(&bytes[..bytes.len() / 3]).await;
    assert!(catalog.is_fallback());
    assert_eq!(catalog.sides(), fallback_sides().as_slice());
}

#[tokio::test]
async fn test_legacy_dataset_defaults_has_audio() {
    let builder = DatasetBuilder::legacy().await.unwrap();
    let tape = builder.tape("013", None).await.unwrap();
    builder
        .side(tape, side("A", "Tape013A", "The Best of Bluegrass 1940-1941"))
        .await
        .unwrap();
    builder
        .side(tape, side("B", "Tape013B", "The Best of Bluegrass 1940-1941"))
        .await
        .unwrap();

    let catalog = Catalog::from_bytes(&builder.finish().await.unwrap()).await;
    assert_eq!(catalog.origin(), &CatalogOrigin::Dataset);
    assert_eq!(catalog.sides().len(), 2);
    assert!(catalog.sides().iter().all(|s| s.has_audio));
}

#[tokio::test]
async fn test_has_audio_flag_projected() {
    let builder = DatasetBuilder::new().await.unwrap();
    let tape = builder.tape("042", None).await.unwrap();
    builder
        .side(
            tape,
            NewSide {
                has_audio: Some(false),
                ..side("A", "Tape042A", "Live at the Village Vanguard")
            },
        )
        .await
        .unwrap();

    let catalog = Catalog::from_bytes(&builder.finish().await.unwrap()).await;
    assert!(!catalog.sides()[0].has_audio);
}

#[tokio::test]
async fn test_load_from_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cassette_library.db");

    let builder = DatasetBuilder::create_at(&path).await.unwrap();
    scenario_a(&builder).await;
    builder.finish().await.unwrap();

    let catalog = Catalog::load(&DatasetSource::File(path)).await;
    assert_eq!(catalog.origin(), &CatalogOrigin::Dataset);
    assert_eq!(catalog.sides()[0].filename, "Tape013A");
}
