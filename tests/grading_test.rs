use speechscreen::error::GradingError;
use speechscreen::models::grade::GroupScore;
use speechscreen::models::package::{AnswerOption, Package, Question, SubGroup};
use speechscreen::models::submission::{SubmittedAnswer, SubmittedAnswerSet, SubmittedGroup};
use speechscreen::services::grading_service::GradingService;
use uuid::Uuid;

fn question(text: &str, answers: &[(&str, i32)]) -> Question {
    Question {
        text: text.to_string(),
        answers: answers
            .iter()
            .map(|(t, v)| AnswerOption {
                text: t.to_string(),
                value: *v,
            })
            .collect(),
    }
}

fn package(groups: Vec<SubGroup>) -> Package {
    Package {
        id: Uuid::new_v4(),
        name: "Screening".to_string(),
        template_id: Uuid::new_v4(),
        is_active: true,
        is_locked: false,
        sub_groups: groups,
    }
}

fn math_package() -> Package {
    package(vec![SubGroup {
        name: "math".to_string(),
        questions: vec![question("2+2?", &[("4", 1), ("5", 2)])],
    }])
}

fn answered(group: &str, pairs: &[(&str, &str)]) -> SubmittedGroup {
    SubmittedGroup {
        name: group.to_string(),
        answers: pairs
            .iter()
            .map(|(q, a)| SubmittedAnswer {
                question: q.to_string(),
                answer: a.to_string(),
            })
            .collect(),
    }
}

#[test]
fn scores_single_group_submission() {
    let submission = SubmittedAnswerSet {
        groups: vec![answered("math", &[("2+2?", "5")])],
    };

    let result = GradingService::grade(&submission, &math_package()).unwrap();
    assert_eq!(
        result.groups,
        vec![GroupScore {
            group_name: "math".to_string(),
            score: 2,
        }]
    );
    assert_eq!(result.total, 2);
}

#[test]
fn grading_is_deterministic() {
    let submission = SubmittedAnswerSet {
        groups: vec![answered("math", &[("2+2?", "4")])],
    };
    let pkg = math_package();

    let first = GradingService::grade(&submission, &pkg).unwrap();
    let second = GradingService::grade(&submission, &pkg).unwrap();
    assert_eq!(first, second);
}

#[test]
fn group_order_follows_package_not_submission() {
    let pkg = package(vec![
        SubGroup {
            name: "A".to_string(),
            questions: vec![
                question("a1", &[("x", 2), ("y", 3)]),
                question("a2", &[("x", 4), ("y", 1)]),
            ],
        },
        SubGroup {
            name: "B".to_string(),
            questions: vec![question("b1", &[("x", 2), ("y", 5)])],
        },
        SubGroup {
            name: "C".to_string(),
            questions: vec![question("c1", &[("x", 2), ("y", 6)])],
        },
    ]);

    // Submitted back to front; A answers sum to 6, B and C to 2 each.
    let submission = SubmittedAnswerSet {
        groups: vec![
            answered("C", &[("c1", "x")]),
            answered("B", &[("b1", "x")]),
            answered("A", &[("a1", "x"), ("a2", "x")]),
        ],
    };

    let result = GradingService::grade(&submission, &pkg).unwrap();
    let expected: Vec<GroupScore> = [("A", 6), ("B", 2), ("C", 2)]
        .iter()
        .map(|(name, score)| GroupScore {
            group_name: name.to_string(),
            score: *score,
        })
        .collect();
    assert_eq!(result.groups, expected);
    assert_eq!(result.total, 10);
}

#[test]
fn rejects_empty_submission() {
    let submission = SubmittedAnswerSet { groups: vec![] };
    assert_eq!(
        GradingService::grade(&submission, &math_package()),
        Err(GradingError::EmptySubmission)
    );
}

#[test]
fn rejects_missing_required_group_in_package_order() {
    let pkg = package(vec![
        SubGroup {
            name: "first".to_string(),
            questions: vec![question("q1", &[("x", 1), ("y", 2)])],
        },
        SubGroup {
            name: "second".to_string(),
            questions: vec![question("q2", &[("x", 1), ("y", 2)])],
        },
    ]);

    // Both required groups absent; the unknown extra group must not be
    // reported before the first missing one.
    let submission = SubmittedAnswerSet {
        groups: vec![answered("stray", &[("q1", "x")])],
    };
    assert_eq!(
        GradingService::grade(&submission, &pkg),
        Err(GradingError::GroupMissing("first".to_string()))
    );
}

#[test]
fn rejects_unknown_submitted_group() {
    let submission = SubmittedAnswerSet {
        groups: vec![
            answered("math", &[("2+2?", "4")]),
            answered("geography", &[("capital?", "Paris")]),
        ],
    };
    assert_eq!(
        GradingService::grade(&submission, &math_package()),
        Err(GradingError::UnknownGroup("geography".to_string()))
    );
}

#[test]
fn rejects_unanswered_question() {
    let pkg = package(vec![SubGroup {
        name: "math".to_string(),
        questions: vec![
            question("2+2?", &[("4", 1), ("5", 2)]),
            question("3+3?", &[("6", 1), ("7", 2)]),
        ],
    }]);
    let submission = SubmittedAnswerSet {
        groups: vec![answered("math", &[("2+2?", "4")])],
    };
    assert_eq!(
        GradingService::grade(&submission, &pkg),
        Err(GradingError::QuestionUnanswered("3+3?".to_string()))
    );
}

#[test]
fn rejects_unknown_question() {
    let submission = SubmittedAnswerSet {
        groups: vec![answered("math", &[("2+2?", "4"), ("9+9?", "18")])],
    };
    assert_eq!(
        GradingService::grade(&submission, &math_package()),
        Err(GradingError::UnknownQuestion("9+9?".to_string()))
    );
}

#[test]
fn rejects_unknown_answer_text() {
    let submission = SubmittedAnswerSet {
        groups: vec![answered("math", &[("2+2?", "22")])],
    };
    assert_eq!(
        GradingService::grade(&submission, &math_package()),
        Err(GradingError::UnknownAnswer("22".to_string()))
    );
}
