//! End-to-end scenarios, grounded on the spec's own example battery: blocks world (solvable and
//! unreachable), a trivially-satisfied goal, and a multi-city logistics delivery. Each exercises
//! the full pipeline (grounding -> Graphplan / EHC -> validation) the way a caller would.

use strips_planner::config::Cfg;
use strips_planner::schema::{ActionSchema, PredTemplate, PredicateSchema, ProblemSpec};
use strips_planner::{baseline, ehc, graphplan, plan, GroundProblem};

fn blocks_world_spec(goal: Vec<(String, Vec<String>)>) -> ProblemSpec {
    ProblemSpec {
        objects: vec!["R".into(), "G".into(), "B".into(), "A".into()],
        predicates: vec![
            PredicateSchema::new("On", ["?x", "?y"]),
            PredicateSchema::new("OnTable", ["?x"]),
            PredicateSchema::new("Clear", ["?x"]),
        ],
        actions: vec![
            // Move(x,y,z): x was on y, now on z.
            ActionSchema::new(
                "Move",
                ["?x", "?y", "?z"],
                vec![PredTemplate::of("On", ["?x", "?y"]), PredTemplate::of("Clear", ["?x"]), PredTemplate::of("Clear", ["?z"])],
                vec![PredTemplate::of("On", ["?x", "?z"]), PredTemplate::of("Clear", ["?y"])],
                vec![PredTemplate::of("On", ["?x", "?y"]), PredTemplate::of("Clear", ["?z"])],
            )
            .unwrap(),
            // ToTable(x,y): x was on y, now on the table.
            ActionSchema::new(
                "ToTable",
                ["?x", "?y"],
                vec![PredTemplate::of("On", ["?x", "?y"]), PredTemplate::of("Clear", ["?x"])],
                vec![PredTemplate::of("OnTable", ["?x"]), PredTemplate::of("Clear", ["?y"])],
                vec![PredTemplate::of("On", ["?x", "?y"])],
            )
            .unwrap(),
            // FromTable(x,y): x was on the table, now on y.
            ActionSchema::new(
                "FromTable",
                ["?x", "?y"],
                vec![PredTemplate::of("OnTable", ["?x"]), PredTemplate::of("Clear", ["?x"]), PredTemplate::of("Clear", ["?y"])],
                vec![PredTemplate::of("On", ["?x", "?y"])],
                vec![PredTemplate::of("OnTable", ["?x"]), PredTemplate::of("Clear", ["?y"])],
            )
            .unwrap(),
        ],
        init: vec![
            ("On".into(), vec!["R".into(), "B".into()]),
            ("On".into(), vec!["B".into(), "G".into()]),
            ("OnTable".into(), vec!["G".into()]),
            ("OnTable".into(), vec!["A".into()]),
            ("Clear".into(), vec!["R".into()]),
            ("Clear".into(), vec!["A".into()]),
        ],
        goal,
    }
}

#[test]
fn blocks_world_solvable_by_graphplan_and_ehc() {
    let spec = blocks_world_spec(vec![
        ("On".into(), vec!["G".into(), "B".into()]),
        ("On".into(), vec!["B".into(), "R".into()]),
        ("OnTable".into(), vec!["R".into()]),
    ]);
    let problem = GroundProblem::build(&spec, &Cfg::default()).unwrap();

    let layered = graphplan::solve(&problem).expect("blocks world is solvable");
    assert!(plan::validate_layered(&layered, &problem));

    let sequential = ehc::search(&problem).expect("blocks world is solvable");
    assert!(plan::validate_sequential(&sequential, &problem));

    let bfs_plan = baseline::bfs(&problem).expect("blocks world is solvable");
    assert!(plan::validate_sequential(&bfs_plan, &problem));
}

#[test]
fn blocks_world_unreachable_goal_returns_no_plan() {
    let spec = blocks_world_spec(vec![("On".into(), vec!["R".into(), "R".into()])]);
    let problem = GroundProblem::build(&spec, &Cfg::default()).unwrap();

    assert!(graphplan::solve(&problem).is_none());
    assert!(ehc::search(&problem).is_none());
}

#[test]
fn trivially_satisfied_blocks_world_goal_yields_empty_plans() {
    let spec = blocks_world_spec(vec![("Clear".into(), vec!["R".into()]), ("Clear".into(), vec!["A".into()])]);
    let problem = GroundProblem::build(&spec, &Cfg::default()).unwrap();

    let layered = graphplan::solve(&problem).expect("goal already holds in init");
    assert!(layered.layers.is_empty());

    let sequential = ehc::search(&problem).expect("goal already holds in init");
    assert!(sequential.is_empty());
}

/// A small multi-city package-delivery domain: one truck shuttling between an airport and an
/// office, one plane shuttling between three cities' airports. `packet1` starts at `city1`,
/// `packet2` at `city3`; both must reach `office2` in `city2`.
fn logistics_spec() -> ProblemSpec {
    ProblemSpec {
        objects: vec![
            "packet1".into(),
            "packet2".into(),
            "truck2".into(),
            "plane1".into(),
            "city1".into(),
            "apt2".into(),
            "office2".into(),
            "city3".into(),
        ],
        predicates: vec![
            PredicateSchema::new("At", ["?x", "?l"]),
            PredicateSchema::new("In", ["?x", "?v"]),
            PredicateSchema::new("Connected", ["?l1", "?l2"]),
            PredicateSchema::new("Airport", ["?l"]),
        ],
        actions: vec![
            ActionSchema::new(
                "Load",
                ["?p", "?v", "?l"],
                vec![PredTemplate::of("At", ["?p", "?l"]), PredTemplate::of("At", ["?v", "?l"])],
                vec![PredTemplate::of("In", ["?p", "?v"])],
                vec![PredTemplate::of("At", ["?p", "?l"])],
            )
            .unwrap(),
            ActionSchema::new(
                "Unload",
                ["?p", "?v", "?l"],
                vec![PredTemplate::of("In", ["?p", "?v"]), PredTemplate::of("At", ["?v", "?l"])],
                vec![PredTemplate::of("At", ["?p", "?l"])],
                vec![PredTemplate::of("In", ["?p", "?v"])],
            )
            .unwrap(),
            ActionSchema::new(
                "Drive",
                ["?v", "?l1", "?l2"],
                vec![PredTemplate::of("At", ["?v", "?l1"]), PredTemplate::of("Connected", ["?l1", "?l2"])],
                vec![PredTemplate::of("At", ["?v", "?l2"])],
                vec![PredTemplate::of("At", ["?v", "?l1"])],
            )
            .unwrap(),
            ActionSchema::new(
                "Fly",
                ["?v", "?l1", "?l2"],
                vec![PredTemplate::of("At", ["?v", "?l1"]), PredTemplate::of("Airport", ["?l1"]), PredTemplate::of("Airport", ["?l2"])],
                vec![PredTemplate::of("At", ["?v", "?l2"])],
                vec![PredTemplate::of("At", ["?v", "?l1"])],
            )
            .unwrap(),
        ],
        init: vec![
            ("At".into(), vec!["packet1".into(), "city1".into()]),
            ("At".into(), vec!["packet2".into(), "city3".into()]),
            ("At".into(), vec!["plane1".into(), "city1".into()]),
            ("At".into(), vec!["truck2".into(), "apt2".into()]),
            ("Connected".into(), vec!["apt2".into(), "office2".into()]),
            ("Connected".into(), vec!["office2".into(), "apt2".into()]),
            ("Airport".into(), vec!["city1".into()]),
            ("Airport".into(), vec!["apt2".into()]),
            ("Airport".into(), vec!["city3".into()]),
        ],
        goal: vec![
            ("At".into(), vec!["packet1".into(), "office2".into()]),
            ("At".into(), vec!["packet2".into(), "office2".into()]),
        ],
    }
}

#[test]
fn logistics_delivery_solved_by_graphplan_and_ehc() {
    let spec = logistics_spec();
    let problem = GroundProblem::build(&spec, &Cfg::default()).unwrap();

    let layered = graphplan::solve(&problem).expect("logistics delivery is solvable");
    assert!(plan::validate_layered(&layered, &problem));

    let sequential = ehc::search(&problem).expect("logistics delivery is solvable");
    assert!(plan::validate_sequential(&sequential, &problem));
}
