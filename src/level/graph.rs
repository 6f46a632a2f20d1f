//! Reachability search over placed platforms

use std::collections::VecDeque;

use super::content::Platform;
use super::envelope::JumpEnvelope;

/// Breadth-first search from the platforms at `start`
///
/// An edge `P -> Q` exists when `envelope.can_reach(P, Q)`. Returns one flag
/// per platform; out-of-range start indices are skipped.
pub fn reachable_from(platforms: &[Platform], start: &[usize], envelope: &JumpEnvelope) -> Vec<bool> {
    let mut seen = vec![false; platforms.len()];
    let mut queue = VecDeque::new();

    for &i in start {
        if i < platforms.len() && !seen[i] {
            seen[i] = true;
            queue.push_back(i);
        }
    }

    while let Some(i) = queue.pop_front() {
        let from = &platforms[i];
        for (j, to) in platforms.iter().enumerate() {
            if !seen[j] && envelope.can_reach(from, to) {
                seen[j] = true;
                queue.push_back(j);
            }
        }
    }
    seen
}

/// Indices of floating platforms no ground platform leads to
pub fn unreachable(platforms: &[Platform], envelope: &JumpEnvelope) -> Vec<usize> {
    let ground: Vec<usize> = platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind.is_ground())
        .map(|(i, _)| i)
        .collect();

    reachable_from(platforms, &ground, envelope)
        .into_iter()
        .enumerate()
        .filter(|&(_, seen)| !seen)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::PlatformKind;

    fn envelope() -> JumpEnvelope {
        JumpEnvelope::new(0.6, 12.0, 5.0, 1.0)
    }

    #[test]
    fn test_chain_is_reachable() {
        let platforms = vec![
            Platform::new(0.0, 550.0, 400.0, 50.0, PlatformKind::Ground, 0),
            Platform::new(300.0, 470.0, 100.0, 20.0, PlatformKind::CLIMB, 0),
            Platform::new(350.0, 400.0, 100.0, 20.0, PlatformKind::CLIMB, 0),
            Platform::new(420.0, 320.0, 100.0, 20.0, PlatformKind::CLIMB, 0),
        ];
        let seen = reachable_from(&platforms, &[0], &envelope());
        assert_eq!(seen, vec![true; 4]);
        assert!(unreachable(&platforms, &envelope()).is_empty());
    }

    #[test]
    fn test_isolated_platform_reported() {
        let platforms = vec![
            Platform::new(0.0, 550.0, 400.0, 50.0, PlatformKind::Ground, 0),
            Platform::new(100.0, 470.0, 100.0, 20.0, PlatformKind::CLIMB, 0),
            // Far above the apex of anything below it
            Platform::new(100.0, 200.0, 100.0, 20.0, PlatformKind::BRIDGE, 0),
        ];
        assert_eq!(unreachable(&platforms, &envelope()), vec![2]);
    }

    #[test]
    fn test_search_is_directed() {
        // Dropping down is always possible, climbing back is not
        let platforms = vec![
            Platform::new(0.0, 200.0, 100.0, 20.0, PlatformKind::CLIMB, 0),
            Platform::new(0.0, 550.0, 400.0, 50.0, PlatformKind::Ground, 0),
        ];
        assert_eq!(reachable_from(&platforms, &[0], &envelope()), vec![true, true]);
        assert_eq!(reachable_from(&platforms, &[1], &envelope()), vec![false, true]);
    }

    #[test]
    fn test_bad_start_index_skipped() {
        let platforms = vec![Platform::new(0.0, 550.0, 400.0, 50.0, PlatformKind::Ground, 0)];
        assert_eq!(reachable_from(&platforms, &[3], &envelope()), vec![false]);
    }
}
