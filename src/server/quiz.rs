use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::deserializers::LenientId;
use crate::db::Question;

/// Category selector sent by the quiz client. Id `0` stands for every category.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum QuizCategory {
    ById(LenientId),
    ByObject { id: LenientId },
}

impl QuizCategory {
    /// Category id to filter on, `None` when every category is allowed.
    pub fn filter(&self) -> Option<i64> {
        let id = match self {
            QuizCategory::ById(id) | QuizCategory::ByObject { id } => id.0,
        };
        (id != 0).then_some(id)
    }
}

/// Picks one of `candidates` not listed in `previous`, uniformly at random.
pub fn pick_unseen<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Option<Question> {
    let unseen: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    unseen.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: "answer".to_owned(),
            category: Some("2".to_owned()),
            difficulty: Some(1),
        }
    }

    #[test]
    fn category_variants_resolve_at_the_boundary() {
        let by_id: QuizCategory = serde_json::from_value(json!(2)).unwrap();
        let by_object: QuizCategory =
            serde_json::from_value(json!({"type": "Art", "id": 2})).unwrap();
        let by_string_id: QuizCategory =
            serde_json::from_value(json!({"type": "Art", "id": "2"})).unwrap();
        let all: QuizCategory = serde_json::from_value(json!({"type": "click", "id": 0})).unwrap();

        assert_eq!(by_id.filter(), Some(2));
        assert_eq!(by_object.filter(), Some(2));
        assert_eq!(by_string_id.filter(), Some(2));
        assert_eq!(all.filter(), None);
        assert!(serde_json::from_value::<QuizCategory>(json!({"type": "Art"})).is_err());
    }

    #[test]
    fn never_picks_previous_questions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let candidates = (1..=5).map(question).collect();
            let picked = pick_unseen(candidates, &[1, 2, 4], &mut rng).unwrap();
            assert!(picked.id == 3 || picked.id == 5);
        }
    }

    #[test]
    fn every_unseen_question_can_be_picked() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let candidates = (1..=4).map(question).collect();
            seen.insert(pick_unseen(candidates, &[], &mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn exhausted_candidates_yield_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = (1..=2).map(question).collect();
        assert_eq!(pick_unseen(candidates, &[1, 2], &mut rng), None);
        assert_eq!(pick_unseen(Vec::new(), &[], &mut rng), None);
    }
}
