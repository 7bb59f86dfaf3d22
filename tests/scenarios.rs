use std::time::Duration;

use fsmplay::{
    DiagramGraph, Mount, PlayState, Player, PlayerConfig, PlayerEvent, RecordingSurface, Timeline,
    VirtualClock,
};

fn frame_of(tl: &Timeline) -> DiagramGraph {
    let mut g = DiagramGraph::default();
    tl.frame(&mut g);
    g
}

fn nodes(g: &DiagramGraph) -> Vec<&str> {
    g.node_ids().collect()
}

fn edges(g: &DiagramGraph) -> Vec<(&str, &str, &str)> {
    g.edges()
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str(), e.attrs.label.as_str()))
        .collect()
}

#[test]
fn scenario_a_single_transition() {
    let mut tl = Timeline::new().edge("S1", "S2", "x");
    tl.rewind();
    assert!(tl.next());

    let g = frame_of(&tl);
    assert_eq!(nodes(&g), vec!["S1", "S2"]);
    assert_eq!(edges(&g), vec![("S1", "S2", "x")]);
    assert!(tl.finished());
}

#[test]
fn scenario_b_backward_step_reverts_exactly() {
    let mut tl = Timeline::new().edge("S1", "S2", "x").edge("S2", "S3", "y");
    tl.next();
    let at0 = frame_of(&tl);

    tl.next();
    let at1 = frame_of(&tl);
    assert_eq!(nodes(&at1), vec!["S1", "S2", "S3"]);
    assert_eq!(edges(&at1), vec![("S1", "S2", "x"), ("S2", "S3", "y")]);

    tl.prev();
    let back = frame_of(&tl);
    assert_eq!(back, at0);
    assert!(back.edge("S2", "S3").is_none());
}

#[test]
fn scenario_c_group_is_one_step() {
    let mut tl = Timeline::new()
        .group()
        .edge("A", "B", "p")
        .edge("C", "D", "q")
        .end();
    assert_eq!(tl.progress().length, 1);

    tl.next();
    let g = frame_of(&tl);
    assert_eq!(nodes(&g), vec!["A", "B", "C", "D"]);
    assert_eq!(edges(&g), vec![("A", "B", "p"), ("C", "D", "q")]);
}

#[test]
fn scenario_d_autoplay_runs_to_idle() {
    let tl = Timeline::new()
        .edge("S1", "S2", "a")
        .edge("S2", "S3", "b")
        .edge("S3", "S1", "c");
    let mut p = Player::new(
        Mount::new("#d"),
        tl,
        RecordingSurface::new(),
        VirtualClock::new(),
        PlayerConfig::default(),
    )
    .unwrap();

    p.handle(PlayerEvent::Toggle).unwrap();
    assert_eq!(p.state(), PlayState::Playing);

    let interval = Duration::from_millis(1200);
    for tick in 1..=3 {
        let token = p.pending_timer().expect("timer scheduled while playing");
        let fired = p.clock_mut().advance(interval);
        assert_eq!(fired, vec![token]);
        p.handle(PlayerEvent::Tick(token)).unwrap();
        if tick < 3 {
            assert_eq!(p.state(), PlayState::Playing);
        }
    }

    assert_eq!(p.state(), PlayState::Idle);
    assert_eq!(p.pending_timer(), None);
    assert_eq!(p.clock().pending(), 0);
    let progress = p.progress();
    assert_eq!(progress.pos, progress.length as isize - 1);
}

#[test]
fn scenario_e_missing_target_has_no_edge() {
    let mut tl = Timeline::new().add("S1", None, Some("label"));
    tl.next();
    let g = frame_of(&tl);
    assert_eq!(nodes(&g), vec!["S1"]);
    assert!(g.edges().is_empty());
}

#[test]
fn cursor_walk_counts() {
    let mut tl = Timeline::new()
        .node("a")
        .group()
        .edge("b", "c", "x")
        .edge("c", "d", "y")
        .end()
        .edge("d", "a", "z");
    let len = tl.progress().length;
    assert_eq!(len, 3);

    let forwards = std::iter::from_fn(|| tl.next().then_some(())).count();
    assert_eq!(forwards, len);
    assert!(!tl.next());

    let pos = tl.pos();
    let backwards = std::iter::from_fn(|| tl.prev().then_some(())).count();
    assert_eq!(backwards as isize, pos + 1);
    assert!(!tl.prev());
}

#[test]
fn frames_accumulate_in_document_order() {
    let mut tl = Timeline::new()
        .edge("S", "A", "*")
        .group()
        .edge("A", "B", "p")
        .edge("S", "C", "q")
        .end()
        .edge("B", "S", "r");

    let mut sizes = Vec::new();
    while tl.next() {
        let g = frame_of(&tl);
        sizes.push((g.nodes().len(), g.edges().len()));
    }
    assert_eq!(sizes, vec![(2, 1), (4, 3), (4, 4)]);

    let g = frame_of(&tl);
    assert_eq!(nodes(&g), vec!["S", "A", "B", "C"]);
}
