use std::collections::HashMap;

use sysinfo::Users;

use crate::error::Error;

/// External user-name resolution, injected so tests can script it.
pub trait UserLookup {
    fn lookup(&self, uid: u32) -> Result<String, Error>;
}

/// Resolver backed by the system user list, refreshed once at startup.
pub struct SystemUsers {
    users: Users,
}

impl SystemUsers {
    pub fn new() -> Self {
        SystemUsers {
            users: Users::new_with_refreshed_list(),
        }
    }
}

impl Default for SystemUsers {
    fn default() -> Self {
        Self::new()
    }
}

impl UserLookup for SystemUsers {
    fn lookup(&self, uid: u32) -> Result<String, Error> {
        let wanted = uid.to_string();
        self.users
            .list()
            .iter()
            .find(|user| user.id().to_string() == wanted)
            .map(|user| user.name().to_string())
            .ok_or(Error::IdentityResolutionFailed(uid))
    }
}

/// Memoizes uid → user-name resolution for the life of the store.
///
/// A miss performs exactly one call through the lookup; a failed
/// resolution is cached too (as the numeric uid), so a persistently
/// unresolvable uid never triggers repeated lookups. Entries are never
/// evicted.
pub struct UserCache {
    names: HashMap<u32, String>,
    lookup: Box<dyn UserLookup>,
}

impl UserCache {
    pub fn new(lookup: Box<dyn UserLookup>) -> Self {
        UserCache {
            names: HashMap::new(),
            lookup,
        }
    }

    pub fn resolve(&mut self, uid: u32) -> &str {
        self.names.entry(uid).or_insert_with(|| {
            self.lookup
                .lookup(uid)
                .unwrap_or_else(|_| uid.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingLookup {
        calls: Rc<Cell<usize>>,
        known: Option<&'static str>,
    }

    impl UserLookup for CountingLookup {
        fn lookup(&self, uid: u32) -> Result<String, Error> {
            self.calls.set(self.calls.get() + 1);
            self.known
                .map(str::to_string)
                .ok_or(Error::IdentityResolutionFailed(uid))
        }
    }

    #[test]
    fn miss_resolves_once_then_hits() {
        let calls = Rc::new(Cell::new(0));
        let mut cache = UserCache::new(Box::new(CountingLookup {
            calls: Rc::clone(&calls),
            known: Some("root"),
        }));

        assert_eq!(cache.resolve(0), "root");
        assert_eq!(cache.resolve(0), "root");
        assert_eq!(cache.resolve(0), "root");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failed_resolution_is_cached_as_numeric_placeholder() {
        let calls = Rc::new(Cell::new(0));
        let mut cache = UserCache::new(Box::new(CountingLookup {
            calls: Rc::clone(&calls),
            known: None,
        }));

        assert_eq!(cache.resolve(1042), "1042");
        assert_eq!(cache.resolve(1042), "1042");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn distinct_uids_resolve_independently() {
        let calls = Rc::new(Cell::new(0));
        let mut cache = UserCache::new(Box::new(CountingLookup {
            calls: Rc::clone(&calls),
            known: Some("svc"),
        }));

        cache.resolve(1);
        cache.resolve(2);
        cache.resolve(1);
        assert_eq!(calls.get(), 2);
    }
}
