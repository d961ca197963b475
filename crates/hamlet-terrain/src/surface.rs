//! The [`HeightSurface`] collaborator and a few simple implementations.

/// A continuous elevation function over the horizontal plane.
///
/// Implementations are read-only and shared across worker threads.
pub trait HeightSurface: Send + Sync {
    /// Surface elevation at `(x, z)`.
    fn height(&self, x: f64, z: f64) -> f64;

    /// Lower bound of [`height`](HeightSurface::height) for the current window.
    fn min_height(&self) -> f64;

    /// Upper bound of [`height`](HeightSurface::height) for the current window.
    fn max_height(&self) -> f64;
}

impl<S: HeightSurface + ?Sized> HeightSurface for &S {
    fn height(&self, x: f64, z: f64) -> f64 {
        (**self).height(x, z)
    }

    fn min_height(&self) -> f64 {
        (**self).min_height()
    }

    fn max_height(&self) -> f64 {
        (**self).max_height()
    }
}

/// A surface at constant elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatSurface {
    pub elevation: f64,
}

impl FlatSurface {
    pub fn new(elevation: f64) -> Self {
        Self { elevation }
    }
}

impl HeightSurface for FlatSurface {
    fn height(&self, _x: f64, _z: f64) -> f64 {
        self.elevation
    }

    fn min_height(&self) -> f64 {
        self.elevation
    }

    fn max_height(&self) -> f64 {
        self.elevation
    }
}

/// Mirrors a surface along the `x = z` diagonal, so `height(x, z) == height(z, x)`.
///
/// Points with `x <= z` are sampled directly; the other half is reflected.
#[derive(Clone, Debug)]
pub struct DiagonalMirror<S> {
    inner: S,
}

impl<S: HeightSurface> DiagonalMirror<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: HeightSurface> HeightSurface for DiagonalMirror<S> {
    fn height(&self, x: f64, z: f64) -> f64 {
        if x <= z {
            self.inner.height(x, z)
        } else {
            self.inner.height(z, x)
        }
    }

    fn min_height(&self) -> f64 {
        self.inner.min_height()
    }

    fn max_height(&self) -> f64 {
        self.inner.max_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slope;

    impl HeightSurface for Slope {
        fn height(&self, x: f64, z: f64) -> f64 {
            x * 2.0 + z
        }

        fn min_height(&self) -> f64 {
            f64::MIN
        }

        fn max_height(&self) -> f64 {
            f64::MAX
        }
    }

    #[test]
    fn test_flat_surface_is_constant() {
        let flat = FlatSurface::new(12.5);
        assert_eq!(flat.height(-100.0, 3.0), 12.5);
        assert_eq!(flat.min_height(), flat.max_height());
    }

    #[test]
    fn test_mirror_is_symmetric() {
        let mirrored = DiagonalMirror::new(Slope);
        for (x, z) in [(1.0, 5.0), (-3.0, 8.0), (7.5, 7.5), (10.0, -2.0)] {
            assert_eq!(mirrored.height(x, z), mirrored.height(z, x));
        }
        // Below the diagonal the inner surface is used unchanged.
        assert_eq!(mirrored.height(1.0, 5.0), Slope.height(1.0, 5.0));
        assert_eq!(mirrored.height(10.0, -2.0), mirrored.inner().height(-2.0, 10.0));
    }

    #[test]
    fn test_borrowed_trait_object_is_a_surface() {
        fn sample(surface: impl HeightSurface) -> f64 {
            surface.height(0.0, 0.0)
        }
        let flat = FlatSurface::new(3.0);
        let by_ref: &dyn HeightSurface = &flat;
        assert_eq!(sample(by_ref), 3.0);
        assert_eq!(sample(DiagonalMirror::new(by_ref)), 3.0);
    }
}
