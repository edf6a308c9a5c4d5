/// Gamma exponent used when reading and writing images.
pub const DEFAULT_GAMMA: f32 = 2.2;

/// Convert encoded samples in `[0, 1]` to linear values in place.
///
/// Each sample becomes `sample ^ gamma`.
pub fn decode_gamma(samples: &mut [f32], gamma: f32) {
    samples.iter_mut().for_each(|s| *s = s.powf(gamma));
}

/// Clip samples to the displayable range `[0, 1]` in place.
pub fn clip(samples: &mut [f32]) {
    samples.iter_mut().for_each(|s| *s = s.clamp(0.0, 1.0));
}

/// Clip linear samples to `[0, 1]` and convert them to encoded values in place.
///
/// Each sample becomes `clamp(sample, 0, 1) ^ (1 / gamma)`.
pub fn encode_gamma(samples: &mut [f32], gamma: f32) {
    clip(samples);
    let inv_gamma = 1.0 / gamma;
    samples.iter_mut().for_each(|s| *s = s.powf(inv_gamma));
}
