//! The station/route catalog.

use rand::Rng;

use super::{DomainError, Route};

/// Ordered, non-empty collection of routes.
///
/// The catalog is built once at startup and shared read-only for the
/// whole run. Emptiness is rejected at construction, so random selection
/// never has to handle an empty range.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    routes: Vec<Route>,
}

impl StationCatalog {
    /// Build a catalog from routes in their source order.
    pub fn new(routes: Vec<Route>) -> Result<Self, DomainError> {
        if routes.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }
        Ok(Self { routes })
    }

    /// Number of routes. Always at least 1.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route at a position, if in bounds.
    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    /// All routes in catalog order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Pick one route uniformly at random over `[0, len)`.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Route {
        let index = rng.random_range(0..self.routes.len());
        &self.routes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn route(id: &str) -> Route {
        Route::new(RouteId::parse(id).unwrap())
    }

    #[test]
    fn empty_catalog_rejected() {
        assert_eq!(
            StationCatalog::new(Vec::new()).unwrap_err(),
            DomainError::EmptyCatalog
        );
    }

    #[test]
    fn preserves_order() {
        let catalog = StationCatalog::new(vec![route("R1"), route("R2"), route("R3")]).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(0).unwrap().route_id.as_str(), "R1");
        assert_eq!(catalog.get(2).unwrap().route_id.as_str(), "R3");
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn choose_reaches_every_route_including_first() {
        let catalog = StationCatalog::new(vec![route("R1"), route("R2"), route("R3")]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];

        for _ in 0..1000 {
            let picked = catalog.choose(&mut rng);
            let idx = catalog
                .routes()
                .iter()
                .position(|r| r.route_id == picked.route_id)
                .unwrap();
            seen[idx] = true;
        }

        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn single_route_catalog_always_returns_it() {
        let catalog = StationCatalog::new(vec![route("ONLY")]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(catalog.choose(&mut rng).route_id.as_str(), "ONLY");
        }
    }
}
