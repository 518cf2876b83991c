use rand::seq::SliceRandom;
use rand::Rng;

/// Headline pool for rejection notices; the body always carries the reason.
pub const ERROR_TITLES: [&str; 10] = [
    "Well, that didn't work",
    "Houston, we have a problem",
    "Oops!",
    "Not quite",
    "The endpoint said no",
    "Nobody's home",
    "That's not a metrics endpoint",
    "Swing and a miss",
    "Computer says no",
    "Try again?",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Builds the notice shown when a URL is rejected, picking a title from
/// [`ERROR_TITLES`] uniformly with `rng`.
pub fn rejection_notice<R: Rng + ?Sized>(reason: impl Into<String>, rng: &mut R) -> Notification {
    let title = ERROR_TITLES.choose(rng).copied().unwrap_or(ERROR_TITLES[0]);
    Notification {
        title: title.to_string(),
        body: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn body_is_reason_and_title_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let notice = rejection_notice("HEAD request failed (404)", &mut rng);
            assert_eq!(notice.body, "HEAD request failed (404)");
            assert!(ERROR_TITLES.contains(&notice.title.as_str()));
        }
    }

    #[test]
    fn same_seed_same_title() {
        let first = rejection_notice("x", &mut StdRng::seed_from_u64(42));
        let second = rejection_notice("x", &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn every_title_is_reachable() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1_000 {
            seen.insert(rejection_notice("x", &mut rng).title);
        }
        assert_eq!(seen.len(), ERROR_TITLES.len());
    }
}
