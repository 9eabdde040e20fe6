use super::*;
use crate::compile::plan::compile_frame;
use crate::eval::evaluator::Evaluator;
use crate::foundation::core::FrameIndex;
use crate::scene::config::SceneConfig;
use crate::scene::timeline::Timeline;

fn list_at(tl: &Timeline, f: u64) -> DrawList {
    compile_frame(&Evaluator::eval_frame(tl, FrameIndex(f)).unwrap()).unwrap()
}

#[test]
fn still_frames_share_a_fingerprint() {
    let tl = Timeline::build(&SceneConfig::default()).unwrap();
    // Pre-sweep wait: nothing moves.
    assert_eq!(
        fingerprint_draw_list(&list_at(&tl, 35)),
        fingerprint_draw_list(&list_at(&tl, 55))
    );
    // Tail: empty frames.
    assert_eq!(
        fingerprint_draw_list(&list_at(&tl, 340)),
        fingerprint_draw_list(&list_at(&tl, 359))
    );
}

#[test]
fn moving_frames_differ() {
    let tl = Timeline::build(&SceneConfig::default()).unwrap();
    assert_ne!(
        fingerprint_draw_list(&list_at(&tl, 90)),
        fingerprint_draw_list(&list_at(&tl, 150))
    );
    assert_ne!(
        fingerprint_draw_list(&list_at(&tl, 10)),
        fingerprint_draw_list(&list_at(&tl, 20))
    );
}

#[test]
fn fingerprint_ignores_frame_index() {
    let tl = Timeline::build(&SceneConfig::default()).unwrap();
    let a = list_at(&tl, 100);
    let mut b = a.clone();
    b.frame = FrameIndex(7);
    assert_eq!(fingerprint_draw_list(&a), fingerprint_draw_list(&b));
}
