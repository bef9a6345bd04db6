/// Purchase watermark state machine
///
/// `Uninitialized` moves to `Tracking` exactly once, on the first non-empty
/// payment list. After that the watermark only moves up.
use crate::apis::PaymentEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Watermark {
    #[default]
    Uninitialized,
    /// Highest payment id already announced
    Tracking(u64),
}

/// What a payment list means for the watermark
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// First list seen; watermark set, nothing to announce
    Initialized(u64),
    /// Nothing above the watermark
    Unchanged(u64),
    /// Events above the watermark, oldest first. The watermark already moved.
    New(Vec<PaymentEvent>),
}

impl Watermark {
    pub fn value(&self) -> Option<u64> {
        match self {
            Watermark::Uninitialized => None,
            Watermark::Tracking(id) => Some(*id),
        }
    }

    /// Apply a newest-first payment list and advance the watermark
    ///
    /// Returns `None` for an empty list, leaving the state untouched.
    pub fn observe(&mut self, events: &[PaymentEvent]) -> Option<Observation> {
        let newest = events.first()?;

        let current = match *self {
            Watermark::Uninitialized => {
                *self = Watermark::Tracking(newest.id);
                return Some(Observation::Initialized(newest.id));
            }
            Watermark::Tracking(current) => current,
        };

        let mut pending = collect_new_events(events, current);
        match pending.first() {
            None => Some(Observation::Unchanged(current)),
            Some(top) => {
                *self = Watermark::Tracking(top.id);
                pending.reverse();
                Some(Observation::New(pending))
            }
        }
    }
}

/// Walk a newest-first list and take events above `watermark`
///
/// Stops at the first id at or below the watermark. Output keeps the input
/// order (newest first). Repeated ids are all kept.
pub fn collect_new_events(events: &[PaymentEvent], watermark: u64) -> Vec<PaymentEvent> {
    events
        .iter()
        .take_while(|event| event.id > watermark)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn events(ids: &[u64]) -> Vec<PaymentEvent> {
        ids.iter()
            .map(|id| PaymentEvent {
                id: *id,
                nickname: format!("player{}", id),
                paid_at: DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").unwrap(),
            })
            .collect()
    }

    fn ids(events: &[PaymentEvent]) -> Vec<u64> {
        events.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_first_observation_initializes_without_events() {
        let mut watermark = Watermark::default();
        assert_eq!(
            watermark.observe(&events(&[105, 104, 103])),
            Some(Observation::Initialized(105))
        );
        assert_eq!(watermark, Watermark::Tracking(105));
    }

    #[test]
    fn test_empty_list_leaves_state() {
        let mut watermark = Watermark::default();
        assert_eq!(watermark.observe(&[]), None);
        assert_eq!(watermark, Watermark::Uninitialized);

        let mut watermark = Watermark::Tracking(7);
        assert_eq!(watermark.observe(&[]), None);
        assert_eq!(watermark.value(), Some(7));
    }

    #[test]
    fn test_new_events_are_chronological() {
        let mut watermark = Watermark::Tracking(105);
        match watermark.observe(&events(&[107, 106, 105, 104])) {
            Some(Observation::New(pending)) => assert_eq!(ids(&pending), vec![106, 107]),
            other => panic!("unexpected observation: {:?}", other),
        }
        assert_eq!(watermark.value(), Some(107));
    }

    #[test]
    fn test_nothing_new() {
        let mut watermark = Watermark::Tracking(107);
        assert_eq!(
            watermark.observe(&events(&[107, 106])),
            Some(Observation::Unchanged(107))
        );
        assert_eq!(
            watermark.observe(&events(&[90, 80])),
            Some(Observation::Unchanged(107))
        );
        assert_eq!(watermark.value(), Some(107));
    }

    #[test]
    fn test_scan_stops_at_first_old_id() {
        // 110 sits below an old id, so the newest-first scan never reaches it
        assert_eq!(ids(&collect_new_events(&events(&[108, 100, 110]), 105)), vec![108]);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        assert_eq!(
            ids(&collect_new_events(&events(&[107, 107, 106, 105]), 105)),
            vec![107, 107, 106]
        );
    }

    #[test]
    fn test_watermark_never_decreases() {
        let batches: Vec<Vec<u64>> = vec![
            vec![50, 49],
            vec![48, 47],
            vec![],
            vec![53, 52, 51, 50],
            vec![10],
            vec![60, 1],
        ];

        let mut watermark = Watermark::default();
        let mut last = 0;
        for batch in batches {
            watermark.observe(&events(&batch));
            let current = watermark.value().unwrap_or(0);
            assert!(current >= last, "watermark went from {} to {}", last, current);
            last = current;
        }
        assert_eq!(last, 60);
    }

    #[test]
    fn test_delivered_set_matches_filter() {
        let list = events(&[20, 19, 18, 15, 12, 11]);
        for w in [0u64, 11, 14, 18, 20, 25] {
            let mut expected: Vec<u64> = ids(&list).into_iter().filter(|id| *id > w).collect();
            expected.sort();

            let mut watermark = Watermark::Tracking(w);
            let delivered = match watermark.observe(&list) {
                Some(Observation::New(pending)) => ids(&pending),
                _ => vec![],
            };
            assert_eq!(delivered, expected, "watermark {}", w);
        }
    }
}
