use std::path::PathBuf;

use argh::FromArgs;

use pixfilt::{
    image::Image,
    imgproc::{
        enhance,
        filter::{self, kernels, BlurNormalization},
    },
    io::{read_image_png_f32, write_image_png_f32, DEFAULT_GAMMA},
};

mod kernel;

use kernel::KernelPreset;

#[derive(FromArgs)]
/// Apply pixel-level filters to PNG images
struct Args {
    /// directory input files are read from
    #[argh(option, default = "PathBuf::from(\"input\")")]
    input_dir: PathBuf,

    /// directory output files are written to
    #[argh(option, default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// gamma exponent used to decode inputs and encode outputs
    #[argh(option, default = "DEFAULT_GAMMA")]
    gamma: f32,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Brighten(BrightenArgs),
    Contrast(ContrastArgs),
    Blur(BlurArgs),
    Convolve(ConvolveArgs),
    Edges(EdgesArgs),
    Demo(DemoArgs),
}

#[derive(FromArgs)]
/// Scale the brightness of an image
#[argh(subcommand, name = "brighten")]
struct BrightenArgs {
    /// input file name
    #[argh(option)]
    input: String,

    /// output file name
    #[argh(option)]
    output: String,

    /// brightness factor, below 1 darkens and above 1 brightens
    #[argh(option)]
    factor: f32,
}

#[derive(FromArgs)]
/// Adjust the contrast of an image around a midpoint
#[argh(subcommand, name = "contrast")]
struct ContrastArgs {
    /// input file name
    #[argh(option)]
    input: String,

    /// output file name
    #[argh(option)]
    output: String,

    /// contrast factor, above 1 increases contrast
    #[argh(option)]
    factor: f32,

    /// value contrast is measured around
    #[argh(option, default = "0.5")]
    midpoint: f32,
}

#[derive(FromArgs)]
/// Blur an image with a box blur
#[argh(subcommand, name = "blur")]
struct BlurArgs {
    /// input file name
    #[argh(option)]
    input: String,

    /// output file name
    #[argh(option)]
    output: String,

    /// odd side length of the blur neighborhood
    #[argh(option)]
    size: usize,

    /// divide by the number of neighbors instead of radius^2
    #[argh(switch)]
    normalized: bool,
}

#[derive(FromArgs)]
/// Convolve an image with a square kernel
#[argh(subcommand, name = "convolve")]
struct ConvolveArgs {
    /// input file name
    #[argh(option)]
    input: String,

    /// output file name
    #[argh(option)]
    output: String,

    /// path to a JSON file holding the kernel rows
    #[argh(option)]
    kernel_file: Option<PathBuf>,

    /// built-in kernel: identity, sobel-x or sobel-y
    #[argh(option)]
    preset: Option<KernelPreset>,
}

#[derive(FromArgs)]
/// Compute the sobel edge magnitude of an image
#[argh(subcommand, name = "edges")]
struct EdgesArgs {
    /// input file name
    #[argh(option)]
    input: String,

    /// output file name
    #[argh(option)]
    output: String,
}

#[derive(FromArgs)]
/// Run every filter on two sample images
#[argh(subcommand, name = "demo")]
struct DemoArgs {
    /// image used for the brightness and contrast filters
    #[argh(option, default = "String::from(\"lake.png\")")]
    lake: String,

    /// image used for the blur and edge filters
    #[argh(option, default = "String::from(\"city.png\")")]
    city: String,
}

/// Resolves file names against the input and output directories.
struct Workspace {
    input_dir: PathBuf,
    output_dir: PathBuf,
    gamma: f32,
}

impl Workspace {
    fn read(&self, name: &str) -> Result<Image, Box<dyn std::error::Error>> {
        let path = self.input_dir.join(name);
        let image = read_image_png_f32(&path, self.gamma)?;
        log::info!(
            "read {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image)
    }

    fn write(&self, name: &str, image: &Image) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(name);
        write_image_png_f32(&path, image, self.gamma)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

fn run_demo(ws: &Workspace, args: &DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let lake = ws.read(&args.lake)?;
    let city = ws.read(&args.city)?;

    ws.write("increase-brightness.png", &enhance::brighten(&lake, 1.7)?)?;
    ws.write("decrease-brightness.png", &enhance::brighten(&lake, 0.3)?)?;

    ws.write("increased-contrast.png", &enhance::contrast(&lake, 2.0, 0.5)?)?;
    ws.write("decreased-contrast.png", &enhance::contrast(&lake, 0.5, 0.5)?)?;

    ws.write("blur-r3.png", &filter::blur(&city, 3)?)?;
    ws.write("blur-r15.png", &filter::blur(&city, 15)?)?;

    let sobel_x = filter::convolve(&city, &kernels::sobel_x())?;
    ws.write("edge-x.png", &sobel_x)?;
    let sobel_y = filter::convolve(&city, &kernels::sobel_y())?;
    ws.write("edge-y.png", &sobel_y)?;

    ws.write("edge-xy.png", &enhance::merge(&sobel_x, &sobel_y)?)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let ws = Workspace {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        gamma: args.gamma,
    };

    match args.command {
        Command::Brighten(args) => {
            let image = ws.read(&args.input)?;
            ws.write(&args.output, &enhance::brighten(&image, args.factor)?)?;
        }
        Command::Contrast(args) => {
            let image = ws.read(&args.input)?;
            let contrasted = enhance::contrast(&image, args.factor, args.midpoint)?;
            ws.write(&args.output, &contrasted)?;
        }
        Command::Blur(args) => {
            let normalization = if args.normalized {
                BlurNormalization::NeighborCount
            } else {
                BlurNormalization::RadiusSquared
            };
            let image = ws.read(&args.input)?;
            let blurred = filter::blur_with(&image, args.size, normalization)?;
            ws.write(&args.output, &blurred)?;
        }
        Command::Convolve(args) => {
            let kernel = match (args.kernel_file, args.preset) {
                (Some(path), None) => kernel::load_kernel(path)?,
                (None, Some(preset)) => preset.kernel(),
                _ => return Err("exactly one of --kernel-file or --preset is required".into()),
            };
            let image = ws.read(&args.input)?;
            ws.write(&args.output, &filter::convolve(&image, &kernel)?)?;
        }
        Command::Edges(args) => {
            let image = ws.read(&args.input)?;
            ws.write(&args.output, &filter::sobel_magnitude(&image)?)?;
        }
        Command::Demo(args) => run_demo(&ws, &args)?,
    }

    Ok(())
}
