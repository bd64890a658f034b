//! Registry generation utilities

use dockring_logic::registry::{Registry, GROUP_LEN};
use rand::Rng;

/// Generate a random `LLL-DDD` registry.
///
/// With probability `forged_chance` the displayed checksum is drawn uniformly
/// from 0-9 instead of computed; the draw can still land on the real value.
pub fn random_registry(rng: &mut impl Rng, forged_chance: f64) -> Registry {
    let mut letters = [0u8; GROUP_LEN];
    let mut digits = [0u8; GROUP_LEN];
    for l in letters.iter_mut() {
        *l = rng.gen_range(0..26);
    }
    for d in digits.iter_mut() {
        *d = rng.gen_range(0..10);
    }
    let registry = Registry::from_indices(letters, digits);

    if rng.gen_bool(forged_chance.clamp(0.0, 1.0)) {
        registry.displaying(rng.gen_range(0..10))
    } else {
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_registry_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let text = random_registry(&mut rng, 0.5).to_string();
            let (letters, digits) = text.split_once('-').unwrap();
            assert_eq!(letters.len(), 3);
            assert_eq!(digits.len(), 3);
            assert!(letters.bytes().all(|b| b.is_ascii_uppercase()));
            assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_no_forgery_when_chance_zero() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            assert!(random_registry(&mut rng, 0.0).is_authentic());
        }
    }

    #[test]
    fn test_forgeries_appear_when_chance_one() {
        let mut rng = StdRng::seed_from_u64(13);
        let forged = (0..200)
            .map(|_| random_registry(&mut rng, 1.0))
            .filter(|r| !r.is_authentic())
            .count();
        // A random digit matches the real checksum about one time in ten.
        assert!(forged > 120, "only {forged} forged");
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..200 {
            assert!(random_registry(&mut rng, 1.0).displayed_checksum() <= 9);
        }
    }
}
