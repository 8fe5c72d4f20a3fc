use subcue::source::encoding_for_label;
use subcue::{lookup, CueStore, IndexMode, Parser, Source, SubcueError, UTF_8};

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/sample.srt");
const LATIN1: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/latin1.srt");

const TWO_CUES: &str =
    "1\n00:00:01,000 --> 00:00:03,000\nHello\n\n2\n00:00:05,500 --> 00:00:07,250\nWorld\n";

#[test]
fn test_two_cue_scenario() {
    for mode in &[IndexMode::Natural, IndexMode::Synthetic] {
        let store = CueStore::from_text(TWO_CUES, *mode);
        assert_eq!(lookup(Some(&store), 2.0), Some("Hello"));
        assert_eq!(lookup(Some(&store), 4.0), None);
        assert_eq!(lookup(Some(&store), 6.0), Some("World"));
        let keys: Vec<_> = store.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![1, 2]);
    }
}

#[test]
fn test_open_sample_natural_index() {
    let store = CueStore::open(SAMPLE, IndexMode::Natural, UTF_8).expect("sample should load");

    // The second cue numbered 3 replaces the first; 14 has no text.
    assert_eq!(store.len(), 4);
    let keys: Vec<_> = store.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![1, 2, 3, 12]);

    assert_eq!(store.lookup(2.0), Some("Where are you going?"));
    assert_eq!(store.lookup(5.0), Some("Nowhere.\nJust out."));
    assert_eq!(store.lookup(8.0), None);
    assert_eq!(store.lookup(11.0), Some("Come back before dark!"));
    assert_eq!(store.lookup(13.0), Some("Instant."));
    assert_eq!(store.lookup(15.5), None);
}

#[test]
fn test_open_sample_synthetic_index() {
    let store = CueStore::open(SAMPLE, IndexMode::Synthetic, UTF_8).expect("sample should load");

    assert_eq!(store.len(), 5);
    let numbers: Vec<_> = store
        .iter()
        .map(|(key, cue)| (key, cue.sequence_number))
        .collect();
    assert_eq!(
        numbers,
        vec![(1, Some(1)), (2, Some(2)), (3, Some(3)), (4, Some(3)), (5, Some(12))]
    );
    assert_eq!(store.lookup(8.0), Some("<i>[door slams]</i>"));
}

#[test]
fn test_load_from_text_source() {
    let store = CueStore::load(Source::Text(TWO_CUES.to_string()), IndexMode::Natural, UTF_8).unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn test_bytes_with_bom_and_crlf() {
    let payload = "\u{FEFF}1\r\n00:00:01,000 --> 00:00:02,000\r\nCafé\r\n";
    let store = Parser::new().parse_bytes(payload.as_bytes()).unwrap();
    assert_eq!(store.lookup(1.5), Some("Café"));
}

#[test]
fn test_undecodable_payload_fails_whole_parse() {
    let mut payload = TWO_CUES.as_bytes().to_vec();
    payload.push(0xff);
    let result = CueStore::from_bytes(&payload, IndexMode::Natural, UTF_8);
    assert!(matches!(result, Err(SubcueError::Decode { .. })));
}

#[test]
fn test_missing_file_is_reported() {
    let result = CueStore::open("/nonexistent/subtitles.srt", IndexMode::Natural, UTF_8);
    match result {
        Err(err @ SubcueError::Io { .. }) => {
            assert!(err.to_string().contains("/nonexistent/subtitles.srt"))
        }
        other => panic!("expected an io error, got {:?}", other),
    }
}

#[test]
fn test_malformed_blocks_do_not_affect_neighbours() {
    let payload = "1\n00:00:01,000 --> 00:00:02,000\nOne\n\n\
                   2\n00:00:03,000 --> 00:00:04,000 --> 00:00:05,000\nThree stamps\n\n\
                   3\n00:00:06 --> 00:00:07,000\nOne stamp\n\n\
                   4\n00:00:08,000 --> 00:00:09,000\nFour\n";
    let store = CueStore::from_text(payload, IndexMode::Synthetic);
    let texts: Vec<_> = store.iter().map(|(key, cue)| (key, cue.text.as_str())).collect();
    assert_eq!(texts, vec![(1, "One"), (2, "Four")]);
}

#[test]
fn test_open_latin1_file() {
    assert!(matches!(
        CueStore::open(LATIN1, IndexMode::Natural, UTF_8),
        Err(SubcueError::Decode { .. })
    ));

    let latin1 = encoding_for_label("iso-8859-1").unwrap();
    let store = CueStore::open(LATIN1, IndexMode::Natural, latin1).expect("latin1 sample should load");
    assert_eq!(store.len(), 2);
    assert_eq!(store.lookup(2.0), Some("Déjà vu, François?"));
    assert_eq!(store.lookup(4.5), Some("© Cinémathèque"));
}

#[test]
fn test_oversized_sequence_number_with_synthetic_index() {
    let payload = "99999999999999999999\n00:00:01,000 --> 00:00:02,000\nHi\n\n\
                   2\n00:00:03,000 --> 00:00:04,000\nThere\n";

    let store = CueStore::from_text(payload, IndexMode::Synthetic);
    assert_eq!(store.len(), 2);
    assert_eq!(store.lookup(1.5), Some("Hi"));
    assert_eq!(store.get(1).unwrap().sequence_number, None);

    let natural = CueStore::from_text(payload, IndexMode::Natural);
    assert_eq!(natural.len(), 1);
    assert_eq!(natural.lookup(3.5), Some("There"));
}
