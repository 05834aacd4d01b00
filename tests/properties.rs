mod support;

use std::sync::Arc;

use proptest::prelude::*;

use newsverdict_rs::arbiter::{arbitrate, ModelSignal, Signals, MODEL_NOT_LOADED};
use newsverdict_rs::classifier::ClassifierService;
use newsverdict_rs::nlp::LexiconAnnotator;
use newsverdict_rs::redflags::RedFlagDetector;
use newsverdict_rs::types::{ClaimCheck, ClaimStatus, ClassifierLabel, ClassifierOutcome, Verdict};

fn model_signal() -> impl Strategy<Value = ModelSignal> {
    prop_oneof![
        Just(ModelSignal::Unloaded),
        (prop_oneof![Just(ClassifierLabel::Real), Just(ClassifierLabel::Fake), Just(ClassifierLabel::Error)], 0.0..=1.0f64)
            .prop_map(|(label, confidence)| ModelSignal::Outcome(ClassifierOutcome { label, confidence })),
    ]
}

fn claim_check() -> impl Strategy<Value = ClaimCheck> {
    (prop_oneof![Just(ClaimStatus::Confirmed), Just(ClaimStatus::Contradicted), Just(ClaimStatus::Unknown)], "[a-z ]{0,20}")
        .prop_map(|(status, reason)| ClaimCheck { status, reason })
}

proptest! {
    #[test]
    fn detect_is_pure(text in "\\PC{0,200}") {
        let detector = RedFlagDetector::with_defaults(Arc::new(LexiconAnnotator::new()));
        prop_assert_eq!(detector.detect(&text), detector.detect(&text));
    }

    #[test]
    fn arbiter_precedence_holds(count in 0usize..=4, model in model_signal(), claim_search in claim_check()) {
        let signals = Signals { red_flag_count: count, model, claim_search: claim_search.clone() };
        let ruling = arbitrate(&signals);

        prop_assert!(matches!(ruling.verdict, Verdict::Real | Verdict::Fake | Verdict::Unverified));
        if model == ModelSignal::Unloaded {
            prop_assert_eq!(ruling.verdict, Verdict::Fake);
            prop_assert_eq!(ruling.reason.as_str(), MODEL_NOT_LOADED);
        } else if claim_search.status == ClaimStatus::Contradicted {
            prop_assert_eq!(ruling.verdict, Verdict::Fake);
        } else if count >= 2 && claim_search.status != ClaimStatus::Confirmed {
            prop_assert_eq!(ruling.verdict, Verdict::Fake);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn verify_yields_exactly_one_known_verdict(text in "[ -~\\n]{0,160}", loaded in any::<bool>()) {
        let classifier = if loaded { support::model("REAL", 0.8) } else { ClassifierService::unloaded() };
        let verifier = support::verifier(classifier, None);
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let result = rt.block_on(verifier.verify(&text));

        prop_assert!(Verdict::ALL.contains(&result.verdict));
        prop_assert!(!result.reason.is_empty());
        if !loaded {
            prop_assert_eq!(result.verdict, Verdict::Fake);
        }
    }
}
