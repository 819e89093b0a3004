use approx::assert_abs_diff_eq;
use skillset_pp::{
    Difficulty, DifficultyAttributes, HitResultPriority, Performance, ScoreState, SkillKind,
};

use self::common::*;

mod common;

#[test]
fn perfect_play_keeps_full_ratings() {
    init_logging();

    let map = mixed(300);
    let attrs = Difficulty::new(&map).calculate();

    let perfect = Performance::new(&map).attributes(attrs.clone()).calculate();

    for kind in SkillKind::ALL {
        assert_abs_diff_eq!(
            perfect.effective_ratings.get(kind),
            attrs.rating(kind),
            epsilon = 1e-9
        );
    }

    let choked = Performance::new(&map)
        .attributes(attrs)
        .combo(100)
        .n_misses(2)
        .calculate();

    for (kind, pp) in choked.skill_pp.iter() {
        if kind == SkillKind::Accuracy {
            continue;
        }

        assert!(pp < perfect.skill_pp.get(kind), "{kind}: {pp}");
    }

    assert!(choked.pp < perfect.pp);
}

#[test]
fn partial_combo_is_measured_in_combo() {
    let map = jumps_then_sliders(100, 100);
    let attrs = Difficulty::new(&map).calculate();

    assert_eq!(attrs.max_combo, 1100);

    // The whole jump section in one combo, only a small part of max combo
    let jumps_only = Performance::new(&map)
        .attributes(attrs.clone())
        .combo(100)
        .n_misses(0)
        .calculate();

    let effective = jumps_only.effective_ratings.jump_aim;

    assert!(
        effective > 0.95 * attrs.jump_aim,
        "{effective} vs {}",
        attrs.jump_aim
    );

    // Half of the sliders adds nearly nothing on top
    let half_sliders = Performance::new(&map)
        .attributes(attrs.clone())
        .combo(600)
        .n_misses(0)
        .calculate();

    assert!(half_sliders.effective_ratings.jump_aim >= effective - 1e-9);
}

#[test]
fn unranked_mods_are_worth_nothing() {
    let map = jumps(200, 220.0);

    for mods in [RX, AUTO, HD | RX, DT | AUTO] {
        let attrs = Performance::new(&map)
            .mods(mods)
            .accuracy(99.0)
            .n_misses(1)
            .combo(150)
            .calculate();

        assert_eq!(attrs.pp.to_bits(), 0.0_f64.to_bits(), "mods {mods}");
        assert_abs_diff_eq!(attrs.pp_aim, 0.0);
        assert_abs_diff_eq!(attrs.pp_tap, 0.0);
        assert_abs_diff_eq!(attrs.pp_acc, 0.0);
    }
}

#[test]
fn misses_never_increase_pp() {
    let map = mixed(300);
    let attrs = Difficulty::new(&map).calculate();
    assert_eq!(attrs.n_circles, 300);

    let mut prev: Option<(f64, f64)> = None;

    // Each step keeps the accuracy: one 300 becomes a miss, one 100 becomes
    // a 300, and two 50s become 100s.
    for n_misses in 0..10 {
        let state = ScoreState {
            max_combo: attrs.max_combo,
            n300: 250,
            n100: 10 + n_misses,
            n50: 40 - 2 * n_misses,
            n_misses,
        };

        let perf = Performance::new(&map)
            .attributes(attrs.clone())
            .state(state)
            .calculate();

        if let Some((prev_pp, prev_acc)) = prev {
            assert!(perf.pp < prev_pp, "{n_misses} misses: {} >= {prev_pp}", perf.pp);
            assert_abs_diff_eq!(perf.pp_acc, prev_acc, epsilon = 1e-9);
        }

        prev = Some((perf.pp, perf.pp_acc));
    }
}

#[test]
fn higher_accuracy_is_worth_more() {
    let map = mixed(300);
    let attrs = Difficulty::new(&map).calculate();

    let pps: Vec<_> = [90.0, 95.0, 98.0, 100.0]
        .into_iter()
        .map(|acc| {
            Performance::new(&map)
                .attributes(attrs.clone())
                .accuracy(acc)
                .calculate()
                .pp
        })
        .collect();

    assert!(pps.windows(2).all(|w| w[0] < w[1]), "{pps:?}");
}

#[test]
fn worst_case_is_not_better_than_best_case() {
    let map = mixed(300);

    let best = Performance::new(&map)
        .accuracy(93.0)
        .hitresult_priority(HitResultPriority::BestCase)
        .generate_state();

    let worst = Performance::new(&map)
        .accuracy(93.0)
        .hitresult_priority(HitResultPriority::WorstCase)
        .generate_state();

    assert_eq!(best.total_hits(), 300);
    assert_eq!(worst.total_hits(), 300);
    assert!(best.n300 <= worst.n300);
    assert!(best.n50 <= worst.n50);
    assert!((best.accuracy() - 0.93).abs() < 0.005);
    assert!((worst.accuracy() - 0.93).abs() < 0.005);
}

#[test]
fn score_multipliers() {
    let map = jumps(300, 230.0);
    let attrs = Difficulty::new(&map).calculate();

    let calc = |mods: u32| {
        Performance::new(&map)
            .attributes(attrs.clone())
            .mods(mods)
            .accuracy(97.0)
            .calculate()
            .pp
    };

    let nm = calc(NM);

    assert_abs_diff_eq!(calc(NF), nm * 0.9, epsilon = 1e-9);
    assert_abs_diff_eq!(calc(SO), nm * 0.95, epsilon = 1e-9);
    assert_abs_diff_eq!(calc(NF | SO), nm * 0.9 * 0.95, epsilon = 1e-9);
    assert!(calc(HD) > nm);
    assert!(calc(FL) > nm);
}

#[test]
fn no_hits_means_no_pp() {
    let map = mixed(100);
    let attrs = Performance::new(&map).passed_objects(0).calculate();

    assert_abs_diff_eq!(attrs.pp, 0.0);
    assert_eq!(attrs.deviation, None);
    assert_eq!(attrs.n_objects(), 0);
}

#[test]
fn attributes_round_trip() {
    let map = sliders(80);

    let from_map = Performance::new(&map).mods(HD).accuracy(96.0).calculate();
    let difficulty = DifficultyAttributes::from(from_map.clone());
    let from_attrs = difficulty
        .performance()
        .mods(HD)
        .accuracy(96.0)
        .calculate();

    assert_eq!(from_map, from_attrs);
    assert!(from_map.deviation.is_some());
}

#[test]
fn breakdown_lists_intermediate_values() {
    let map = mixed(200);

    let attrs = Performance::new(&map).n_misses(3).calculate();
    assert!(attrs.breakdown.is_none());

    let attrs = Performance::new(&map).n_misses(3).breakdown(true).calculate();
    let breakdown = attrs.breakdown.as_ref().expect("breakdown was requested");

    for kind in SkillKind::ALL {
        assert_abs_diff_eq!(breakdown[kind.name()], attrs.skill_pp.get(kind));
    }

    assert_abs_diff_eq!(breakdown["aim"], attrs.pp_aim);
    assert_abs_diff_eq!(breakdown["tap"], attrs.pp_tap);
    assert_abs_diff_eq!(breakdown["misses"], 3.0);
}
