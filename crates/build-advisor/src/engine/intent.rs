use super::types::{IntentKey, IntentWeights};

/// Rescale intent weights so they sum to one.
///
/// Missing and non-finite values count as zero. When the treated sum is not
/// positive the input is returned untouched instead of dividing by zero.
pub fn normalize_intent(intent: &IntentWeights) -> IntentWeights {
    let sum: f64 = intent.iter().map(|(key, _)| intent.weight(key)).sum();

    if sum <= 0.0 {
        return intent.clone();
    }

    intent
        .iter()
        .map(|(key, _)| (key, intent.weight(key) / sum))
        .collect()
}

/// Axis with the strictly highest weight.
///
/// Every canonical key takes part, with missing and non-finite weights read as
/// zero. Ties resolve to the earliest key in canonical order, so an empty
/// intent reports `burst` at zero.
pub fn dominant_intent(intent: &IntentWeights) -> (IntentKey, f64) {
    let mut best = (IntentKey::ALL[0], intent.weight(IntentKey::ALL[0]));

    for key in IntentKey::ALL.into_iter().skip(1) {
        let weight = intent.weight(key);
        if weight > best.1 {
            best = (key, weight);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_scales_to_unit_sum() {
        let intent = IntentWeights::new()
            .with(IntentKey::Burst, 3.0)
            .with(IntentKey::Tank, 1.0);

        let normalized = normalize_intent(&intent);

        assert_eq!(normalized.raw(IntentKey::Burst), Some(0.75));
        assert_eq!(normalized.raw(IntentKey::Tank), Some(0.25));
        assert_eq!(normalized.raw(IntentKey::Sustain), None);
    }

    #[test]
    fn normalize_zeroes_non_finite_entries() {
        let intent = IntentWeights::new()
            .with(IntentKey::Burst, f64::NAN)
            .with(IntentKey::Mobility, 2.0)
            .with(IntentKey::Utility, f64::INFINITY);

        let normalized = normalize_intent(&intent);

        assert_eq!(normalized.raw(IntentKey::Burst), Some(0.0));
        assert_eq!(normalized.raw(IntentKey::Mobility), Some(1.0));
        assert_eq!(normalized.raw(IntentKey::Utility), Some(0.0));
    }

    #[test]
    fn normalize_fails_open_on_non_positive_sum() {
        let zeros = IntentWeights::single(IntentKey::Burst, 0.0);
        assert_eq!(normalize_intent(&zeros), zeros);

        let negative = IntentWeights::new()
            .with(IntentKey::Burst, 1.0)
            .with(IntentKey::Tank, -2.0);
        assert_eq!(normalize_intent(&negative), negative);

        let empty = IntentWeights::new();
        assert!(normalize_intent(&empty).is_empty());
    }

    #[test]
    fn dominant_prefers_canonical_order_on_ties() {
        let intent = IntentWeights::new()
            .with(IntentKey::Utility, 0.5)
            .with(IntentKey::Sustain, 0.5);

        assert_eq!(dominant_intent(&intent), (IntentKey::Sustain, 0.5));
    }

    #[test]
    fn dominant_skips_non_finite_weights() {
        let intent = IntentWeights::new()
            .with(IntentKey::Burst, f64::INFINITY)
            .with(IntentKey::Tank, 0.2);

        assert_eq!(dominant_intent(&intent), (IntentKey::Tank, 0.2));
        assert_eq!(
            dominant_intent(&IntentWeights::new()),
            (IntentKey::Burst, 0.0)
        );
    }

    #[test]
    fn dominant_reads_missing_keys_as_zero() {
        let intent = IntentWeights::new()
            .with(IntentKey::Burst, -3.0)
            .with(IntentKey::Mobility, -1.0);
        assert_eq!(dominant_intent(&intent), (IntentKey::Sustain, 0.0));

        let all_negative: IntentWeights = IntentKey::ALL
            .into_iter()
            .map(|key| (key, -1.0))
            .collect::<IntentWeights>()
            .with(IntentKey::Tank, -0.5);
        assert_eq!(dominant_intent(&all_negative), (IntentKey::Tank, -0.5));

        let tank_only_negative = IntentWeights::single(IntentKey::Tank, -2.0);
        assert_eq!(dominant_intent(&tank_only_negative), (IntentKey::Burst, 0.0));
    }
}
