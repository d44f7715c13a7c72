//! Cached project picker options.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::{AppError, ConduitObject};

const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// When a cached project list must be fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Refetch once the cached list is older than the given age.
    Ttl(Duration),
    /// Keep the list until [`ProjectOptionCache::invalidate`] is called.
    Manual,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        RefreshPolicy::Ttl(DEFAULT_TTL)
    }
}

/// A selectable project: display name and PHID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOption {
    pub name: String,
    pub value: String,
}

impl From<&ConduitObject> for ProjectOption {
    fn from(project: &ConduitObject) -> Self {
        let name = project.name().map(str::to_string).unwrap_or_else(|| project.phid.clone());
        ProjectOption { name, value: project.phid.clone() }
    }
}

#[derive(Debug, Default)]
pub struct ProjectOptionCache {
    policy: RefreshPolicy,
    cached: Option<(Instant, Vec<ProjectOption>)>,
}

impl ProjectOptionCache {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self { policy, cached: None }
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// True when a cached list exists and the policy still accepts it at `now`.
    pub fn is_fresh(&self, now: Instant) -> bool {
        match (&self.cached, self.policy) {
            (None, _) => false,
            (Some(_), RefreshPolicy::Manual) => true,
            (Some((fetched_at, _)), RefreshPolicy::Ttl(ttl)) => {
                now.saturating_duration_since(*fetched_at) < ttl
            }
        }
    }

    /// Return the cached list, calling `fetch` first when it is missing or stale.
    ///
    /// A failed fetch leaves any previous entry in place.
    pub fn get_or_refresh<F>(&mut self, now: Instant, fetch: F) -> Result<&[ProjectOption], AppError>
    where
        F: FnOnce() -> Result<Vec<ProjectOption>, AppError>,
    {
        if !self.is_fresh(now) {
            let options = fetch()?;
            self.cached = Some((now, options));
        }
        Ok(self.cached.as_ref().map(|(_, options)| options.as_slice()).unwrap_or_default())
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::testing::conduit_object;

    fn option(name: &str) -> ProjectOption {
        ProjectOption { name: name.to_string(), value: format!("PHID-PROJ-{}", name) }
    }

    #[test]
    fn option_uses_project_name_and_phid() {
        let project = conduit_object("PROJ", 4, "Backend");
        let option = ProjectOption::from(&project);
        assert_eq!(option.name, "Backend");
        assert_eq!(option.value, "PHID-PROJ-obj4");
    }

    #[test]
    fn default_policy_is_five_minute_ttl() {
        let cache = ProjectOptionCache::default();
        assert_eq!(cache.policy(), RefreshPolicy::Ttl(Duration::from_secs(300)));
        assert!(!cache.is_fresh(Instant::now()));
        assert_eq!(ProjectOptionCache::new(RefreshPolicy::Manual).policy(), RefreshPolicy::Manual);
    }

    #[test]
    fn ttl_policy_refetches_after_expiry() {
        let mut cache = ProjectOptionCache::new(RefreshPolicy::Ttl(Duration::from_secs(60)));
        let fetches = Cell::new(0);
        let fetch = || {
            fetches.set(fetches.get() + 1);
            Ok(vec![option("a")])
        };
        let start = Instant::now();

        cache.get_or_refresh(start, fetch).unwrap();
        cache.get_or_refresh(start + Duration::from_secs(30), fetch).unwrap();
        assert_eq!(fetches.get(), 1);

        cache.get_or_refresh(start + Duration::from_secs(61), fetch).unwrap();
        assert_eq!(fetches.get(), 2);
    }

    #[test]
    fn manual_policy_holds_until_invalidated() {
        let mut cache = ProjectOptionCache::new(RefreshPolicy::Manual);
        let start = Instant::now();

        cache.get_or_refresh(start, || Ok(vec![option("a")])).unwrap();
        let later = start + Duration::from_secs(86_400);
        let held = cache.get_or_refresh(later, || Ok(vec![option("b")])).unwrap().to_vec();
        assert_eq!(held, vec![option("a")]);

        cache.invalidate();
        let refreshed = cache.get_or_refresh(later, || Ok(vec![option("b")])).unwrap();
        assert_eq!(refreshed, &[option("b")]);
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let mut cache = ProjectOptionCache::default();
        let now = Instant::now();
        let err = cache
            .get_or_refresh(now, || Err(AppError::config_error("boom")))
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(!cache.is_fresh(now));
    }
}
