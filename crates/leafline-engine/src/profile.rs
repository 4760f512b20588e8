//! Vertical-profile feature derivation
//!
//! Turns a raw vertical atmospheric profile into the derived classes and
//! scores the engine consumes. Profiles with fewer than two layers derive
//! to "unknown" rather than guessing.

use leafline_core::weather::{HumidityLayering, VerticalLayer, WindShearProxy};

/// Layers at or below this altitude count as "low" for inversion detection
pub const LOW_LAYER_CEILING_M: f64 = 150.0;

/// A temperature increase with height anywhere in the low layers
pub fn inversion_present(layers: &[VerticalLayer]) -> bool {
    if layers.len() < 2 {
        return false;
    }

    let mut low: Vec<&VerticalLayer> = layers
        .iter()
        .filter(|layer| layer.altitude_m <= LOW_LAYER_CEILING_M)
        .collect();
    low.sort_by(|a, b| a.altitude_m.total_cmp(&b.altitude_m));

    if low.len() < 2 {
        return false;
    }

    low.windows(2)
        .any(|pair| pair[1].temperature_c > pair[0].temperature_c)
}

/// Classify the surface-to-aloft humidity structure
pub fn humidity_layering(layers: &[VerticalLayer]) -> HumidityLayering {
    if layers.len() < 2 {
        return HumidityLayering::Unknown;
    }

    let sorted = sorted_by_altitude(layers);
    let surface_rh = sorted[0].relative_humidity_pct;
    let aloft_rh = sorted[sorted.len() - 1].relative_humidity_pct;

    if surface_rh - aloft_rh > 20.0 {
        HumidityLayering::DryAloftHumidSurface
    } else if surface_rh > 70.0 && aloft_rh > 70.0 {
        HumidityLayering::UniformHumid
    } else if surface_rh < 50.0 && aloft_rh < 50.0 {
        HumidityLayering::UniformDry
    } else {
        HumidityLayering::Unknown
    }
}

/// Classify shear from the surface/aloft wind-speed difference
pub fn wind_shear_proxy(layers: &[VerticalLayer]) -> WindShearProxy {
    if layers.len() < 2 {
        return WindShearProxy::Unknown;
    }

    let sorted = sorted_by_altitude(layers);
    let surface_wind = sorted[0].wind_speed_kph;
    let upper_wind = sorted[sorted.len() - 1].wind_speed_kph;
    let shear = (upper_wind - surface_wind).abs();

    if shear < 5.0 {
        WindShearProxy::Low
    } else if shear < 15.0 {
        WindShearProxy::Moderate
    } else {
        WindShearProxy::High
    }
}

/// Score spray conditions from the derived classes, 0.0 to 1.0
pub fn spray_window_score(
    inversion: bool,
    humidity: HumidityLayering,
    shear: WindShearProxy,
) -> f64 {
    let mut score: f64 = 1.0;

    if inversion {
        score -= 0.3;
    }

    match humidity {
        HumidityLayering::UniformHumid => score -= 0.1,
        HumidityLayering::DryAloftHumidSurface => score -= 0.2,
        _ => {}
    }

    match shear {
        WindShearProxy::High => score -= 0.3,
        WindShearProxy::Moderate => score -= 0.1,
        _ => {}
    }

    score.max(0.0)
}

fn sorted_by_altitude(layers: &[VerticalLayer]) -> Vec<VerticalLayer> {
    let mut sorted = layers.to_vec();
    sorted.sort_by(|a, b| a.altitude_m.total_cmp(&b.altitude_m));
    sorted
}
