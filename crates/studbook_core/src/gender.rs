//! Gender-maturity mapping used when classifying retirements.

use studbook_data::MatureGender;

/// Maps a raw gender tag onto a breeding pool.
///
/// `None` means the tag is not breeding-eligible.
pub trait GenderMaturity {
    fn mature_gender(&self, raw: &str) -> Option<MatureGender>;
}

/// The default tag table: colt/stallion/male/horse are sires,
/// filly/mare/female are dams. Case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMaturity;

impl GenderMaturity for StandardMaturity {
    fn mature_gender(&self, raw: &str) -> Option<MatureGender> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "colt" | "stallion" | "male" | "horse" => Some(MatureGender::Stallion),
            "filly" | "mare" | "female" => Some(MatureGender::Mare),
            _ => None,
        }
    }
}

impl<F> GenderMaturity for F
where
    F: Fn(&str) -> Option<MatureGender>,
{
    fn mature_gender(&self, raw: &str) -> Option<MatureGender> {
        self(raw)
    }
}
