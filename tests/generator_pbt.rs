use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use studbook_core::stat_generator::heritage;
use studbook_core::stat_generator::StatValues;
use studbook_core::{
    BreedProfile, Customization, DistanceFocus, EngineConfig, GenerationRequest, GenerationType,
    StatGenerator, Strategy as RunningStyle, Surface,
};
use studbook_data::{Pedigree, StatName};

fn arb_kind() -> impl Strategy<Value = GenerationType> {
    prop_oneof![
        Just(GenerationType::Foundation),
        Just(GenerationType::Bred),
        Just(GenerationType::Customized),
    ]
}

fn arb_customization() -> impl Strategy<Value = Customization> {
    (
        proptest::option::of(prop_oneof![Just(Surface::Turf), Just(Surface::Dirt)]),
        proptest::option::of(0..DistanceFocus::ALL.len()),
        proptest::option::of(0..RunningStyle::ALL.len()),
    )
        .prop_map(|(track, distance, strategy)| Customization {
            track,
            distance: distance.map(|i| DistanceFocus::ALL[i]),
            strategy: strategy.map(|i| RunningStyle::ALL[i]),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_generated_stats_never_exceed_caps(
        seed in any::<u64>(),
        breed_idx in 0usize..4,
        kind in arb_kind(),
        custom in arb_customization(),
    ) {
        let config = EngineConfig::default();
        let catalog = config.catalog();
        let names = catalog.names();
        let breed = catalog.get(names[breed_idx % names.len()]).unwrap();
        let generator = StatGenerator::new(config.generator.clone());

        let mut request = GenerationRequest::foundation(breed).with_customization(&custom);
        request.kind = kind;
        let horse = generator
            .generate_stats_with_rng(&request, &mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap();

        for stat in StatName::ALL {
            let value = horse.stats.get(stat);
            prop_assert!(value >= 0);
            prop_assert!(value <= breed.stat_cap(stat), "{stat:?} {value} over cap");
        }
        prop_assert!((0.0..=1.0).contains(&horse.attributes.balance_score));
    }

    #[test]
    fn test_base_draw_stays_in_bounds(seed in any::<u64>(), kind in arb_kind()) {
        let generator = StatGenerator::default();
        let base = generator.generate_base_stats_with_seed(kind, seed).unwrap();
        for stat in StatName::ALL {
            let value = base.stats.get(stat);
            prop_assert!((20.0..=70.0).contains(&value), "{stat:?} drew {value}");
        }
    }

    #[test]
    fn test_vigor_bonus_is_never_negative(average in -50.0f64..200.0) {
        prop_assert!(heritage::hybrid_vigor_bonus(average) >= 0.0);
    }

    #[test]
    fn test_depression_shrinks_positive_stats(
        speed in 0.0f64..150.0,
        stamina in 0.0f64..150.0,
        power in 0.0f64..150.0,
        coefficient in 0.0f64..=0.5,
    ) {
        let stats = StatValues::new(speed, stamina, power);
        let out = heritage::inbreeding_depression(stats, coefficient);
        for stat in StatName::ALL {
            prop_assert!(out.get(stat) <= stats.get(stat));
            prop_assert!(out.get(stat) >= stats.get(stat) * 0.75 - 1e-9);
        }
    }

    #[test]
    fn test_foundation_pedigree_adds_no_heritage(seed in any::<u64>()) {
        let config = EngineConfig::default();
        let catalog = config.catalog();
        let breed = catalog.get("Thoroughbred").unwrap();
        let generator = StatGenerator::new(config.generator.clone());
        let pedigree = Pedigree::default();

        let with = generator
            .generate_stats_with_rng(
                &GenerationRequest::bred(breed, &pedigree),
                &mut ChaCha8Rng::seed_from_u64(seed),
            )
            .unwrap();
        prop_assert!(with.report.heritage.is_none());
        prop_assert_eq!(with.attributes.genetic_diversity, Some(1.0));
    }
}
