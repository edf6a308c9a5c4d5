use std::{path::Path, str::FromStr};

use pixfilt::imgproc::filter::{kernels, Kernel};

/// Built-in convolution kernels selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelPreset {
    Identity,
    SobelX,
    SobelY,
}

impl FromStr for KernelPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "identity" => Ok(Self::Identity),
            "sobel-x" => Ok(Self::SobelX),
            "sobel-y" => Ok(Self::SobelY),
            other => Err(format!(
                "unknown kernel preset '{other}', expected identity, sobel-x or sobel-y"
            )),
        }
    }
}

impl KernelPreset {
    pub fn kernel(self) -> Kernel {
        match self {
            Self::Identity => kernels::identity(),
            Self::SobelX => kernels::sobel_x(),
            Self::SobelY => kernels::sobel_y(),
        }
    }
}

/// Parse a kernel from a JSON array of rows, e.g. `[[1, 0, -1], [2, 0, -2], [1, 0, -1]]`.
pub fn parse_kernel(json: &str) -> Result<Kernel, Box<dyn std::error::Error>> {
    let rows: Vec<Vec<f32>> = serde_json::from_str(json)?;
    Ok(Kernel::try_from(rows)?)
}

pub fn load_kernel(path: impl AsRef<Path>) -> Result<Kernel, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    parse_kernel(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kernel() -> Result<(), Box<dyn std::error::Error>> {
        let kernel = parse_kernel("[[1, 2, 1], [0, 0, 0], [-1, -2, -1]]")?;
        assert_eq!(kernel, kernels::sobel_x());

        assert!(parse_kernel("[[1, 2], [3, 4]]").is_err());
        assert!(parse_kernel("[[1, 2, 3]]").is_err());
        assert!(parse_kernel("not json").is_err());
        Ok(())
    }

    #[test]
    fn test_load_kernel() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("kernel.json");
        std::fs::write(&path, "[[0.5]]")?;

        let kernel = load_kernel(&path)?;
        assert_eq!(kernel.as_slice(), &[0.5]);
        Ok(())
    }

    #[test]
    fn test_preset() {
        assert_eq!("Sobel-X".parse::<KernelPreset>(), Ok(KernelPreset::SobelX));
        assert_eq!("identity".parse::<KernelPreset>(), Ok(KernelPreset::Identity));
        assert!("laplace".parse::<KernelPreset>().is_err());
        assert_eq!(KernelPreset::SobelY.kernel(), kernels::sobel_y());
    }
}
