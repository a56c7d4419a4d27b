use ndarray::prelude::*;
use num_complex::Complex;
use rustsht::field::area_mean;
use rustsht::{SpectralCoeffs, SphereError, SphericalTransform, TransformConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SphereError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = TransformConfig::from_env();
    if config.truncation.is_none() {
        config.truncation = Some(config.nlon / 4);
    }
    let sht = SphericalTransform::from_config(&config)?;
    let (ny, nx) = (sht.grid().nlat(), sht.grid().nlon());
    tracing::info!(nlat = ny, nlon = nx, truncation = sht.truncation(), "transform ready");

    // Constant field
    let c = 3.5;
    let v = Array4::<f64>::from_elem((1, 1, ny, nx), c);
    let vhat = sht.analyze(&v)?;
    tracing::info!(
        c00 = vhat.re[[0, 0, 0, 0]],
        expected = c * 2f64.sqrt(),
        "mean coefficient of a constant field"
    );

    // Streamfunction from vorticity
    let truncation = sht.truncation();
    let psi = sht.synthesize(&SpectralCoeffs::one_hot(
        1,
        1,
        truncation,
        4.min(truncation),
        2,
        Complex::new(1., 0.),
    )?)?;
    let zeta = sht.laplacian(&psi)?;
    let recovered = sht.invert_laplacian(&zeta)?;
    let err = (&recovered - &psi).fold(0., |acc: f64, x| acc.max(x.abs()));
    tracing::info!(err, "laplacian inversion of a single harmonic");

    let variance = sht.analyze(&psi)?.degree_variance();
    let mean_square = area_mean(&psi.mapv(|x| x * x), &sht.grid().weights())?;
    tracing::info!(
        spectral = variance.sum(),
        physical = mean_square[[0, 0]],
        "variance"
    );
    Ok(())
}
