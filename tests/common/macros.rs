/// Asserts every stat of `$stats` lies in `[0, cap]` for the breed.
#[macro_export]
macro_rules! assert_within_caps {
    ($stats:expr, $breed:expr) => {
        for stat in studbook_data::StatName::ALL {
            let value = $stats.get(stat);
            let cap = studbook_core::BreedProfile::stat_cap($breed, stat);
            assert!(
                (0..=cap).contains(&value),
                "{} value {} outside [0, {}] for {}",
                stat,
                value,
                cap,
                studbook_core::BreedProfile::name($breed)
            );
        }
    };
}

/// Asserts two stat blocks compare stat-by-stat with `$op`.
#[macro_export]
macro_rules! assert_each_stat {
    ($left:expr, $op:tt, $right:expr) => {
        for stat in studbook_data::StatName::ALL {
            assert!(
                $left.get(stat) $op $right.get(stat),
                "{}: {} vs {}",
                stat,
                $left.get(stat),
                $right.get(stat)
            );
        }
    };
}
