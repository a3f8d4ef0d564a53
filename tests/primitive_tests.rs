use clocked_dsp::{Decimator, HistoryBuffer, RisingEdge};

#[test]
fn history_indexes_from_the_newest_sample() {
    let mut history = HistoryBuffer::new(3);
    assert_eq!(history.get(0), Some(0.0));
    assert_eq!(history.get(3), None);

    for sample in [1.0, 2.0, 3.0, 4.0] {
        history.push(sample);
    }
    assert_eq!(history.get(0), Some(4.0));
    assert_eq!(history.get(1), Some(3.0));
    assert_eq!(history.get(2), Some(2.0));
    assert_eq!(history.get(3), None);

    let indexed: Vec<f64> = (0..history.len()).filter_map(|i| history.get(i)).collect();
    assert_eq!(indexed, history.to_vec());
}

#[test]
fn empty_history_has_no_samples() {
    let mut history = HistoryBuffer::new(0);
    history.push(1.0);
    assert!(history.is_empty());
    assert_eq!(history.get(0), None);
    assert_eq!(history.dot(&[]), 0.0);
}

#[test]
fn rising_edge_tracks_the_previous_level() {
    let mut edge = RisingEdge::new();
    assert!(!edge.last());

    assert!(edge.update(true));
    assert!(edge.last());
    assert!(!edge.update(true));
    assert!(!edge.update(false));
    assert!(!edge.last());
    assert!(edge.update(true));

    edge.reset();
    assert!(!edge.last());
}

#[test]
fn decimator_fires_once_per_ratio() {
    let mut decimator = Decimator::new(3);
    assert_eq!(decimator.ratio(), 3);

    let fired: Vec<bool> = (0..7).map(|_| decimator.tick()).collect();
    assert_eq!(fired, [false, false, true, false, false, true, false]);
    assert_eq!(decimator.count(), 1);

    decimator.reset();
    assert_eq!(decimator.count(), 0);
}

#[test]
fn zero_ratio_fires_on_every_tick() {
    let mut decimator = Decimator::new(0);
    assert_eq!(decimator.ratio(), 1);
    assert!(decimator.tick());
    assert!(decimator.tick());
    assert_eq!(decimator.count(), 0);
}
