extern crate clap;
extern crate crossbeam;
extern crate env_logger;
extern crate failure;
extern crate fractals;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::ColorType;
use num::Complex;
use std::path::Path;
use std::str::FromStr;

use fractals::{
    Canvas, Color, Command, Escape, Explorer, FractalRenderer, GradientColorizer, StalePolicy,
    Vector2D, View, Weight,
};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn parse_commands(s: &str) -> Result<Vec<Command>, fractals::FractalError> {
    s.split(',')
        .filter(|c| !c.trim().is_empty())
        .map(Command::from_str)
        .collect()
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ZOOM: &str = "zoom";
const CENTER: &str = "center";
const GRADIENT: &str = "gradient";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const COMMANDS: &str = "commands";
const BLUR: &str = "blur";
const WEIGHT: &str = "weight";
const SPIRAL: &str = "spiral";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractals")
        .version("0.1.0")
        .about("Mandelbrot explorer, rendered headless to a PNG")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("400x300")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("16000")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse zoom",
                        "Zoom must be positive",
                    )
                })
                .help("Pixels per unit of the complex plane"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.71,-0.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center"))
                .help("Complex number shown in the middle of the image"),
        )
        .arg(
            Arg::with_name(GRADIENT)
                .long(GRADIENT)
                .short("g")
                .takes_value(true)
                .help("Gradient strip image; column zero is sampled top to bottom"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("50")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Escape-time iterations per pixel"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer"),
        )
        .arg(
            Arg::with_name(COMMANDS)
                .long(COMMANDS)
                .takes_value(true)
                .validator(|s| parse_commands(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Comma separated navigation commands to replay, e.g. zoomIn,panLeft"),
        )
        .arg(
            Arg::with_name(BLUR)
                .long(BLUR)
                .short("b")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        0usize,
                        64,
                        "Could not parse blur radius",
                        "Blur radius must be between 0 and 64",
                    )
                })
                .help("Blur the final frame with this radius"),
        )
        .arg(
            Arg::with_name(WEIGHT)
                .long(WEIGHT)
                .short("w")
                .takes_value(true)
                .default_value("box")
                .validator(|s| Weight::from_str(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Blur weight: box, distance, motion or double:N"),
        )
        .arg(
            Arg::with_name(SPIRAL)
                .long(SPIRAL)
                .help("Draw a spiral over the final frame"),
        )
        .get_matches()
}

fn load_gradient(path: Option<&str>) -> Result<Canvas, failure::Error> {
    match path {
        Some(path) => {
            let strip = image::open(path)?.to_rgba();
            let (width, height) = strip.dimensions();
            info!("loaded {}x{} gradient from {}", width, height, path);
            Ok(Canvas::from_rgba(width as usize, height as usize, strip.into_raw())?)
        }
        None => {
            let mut strip = Canvas::new(1, 256)?;
            strip.draw_gradient();
            Ok(strip)
        }
    }
}

fn write_image(outfile: &str, canvas: &Canvas) -> Result<(), failure::Error> {
    image::save_buffer(
        Path::new(outfile),
        canvas.as_raw(),
        canvas.width() as u32,
        canvas.height() as u32,
        ColorType::RGBA(8),
    )?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let (width, height): (u16, u16) = parse_pair(matches.value_of(SIZE).unwrap_or("400x300"), 'x')
        .ok_or_else(|| failure::err_msg("Error parsing image dimensions"))?;
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap_or("16000"))?;
    let center = parse_complex(matches.value_of(CENTER).unwrap_or("-0.71,-0.25"))
        .ok_or_else(|| failure::err_msg("Error parsing center"))?;
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap_or("50"))?;
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or("1"))?;
    let commands = match matches.value_of(COMMANDS) {
        Some(s) => parse_commands(s)?,
        None => Vec::new(),
    };

    let gradient = load_gradient(matches.value_of(GRADIENT))?;
    let renderer = FractalRenderer::new(GradientColorizer::new(&gradient)?)
        .with_escape(Escape::new(iterations, fractals::escape::DEFAULT_BAILOUT)?)
        .with_threads(threads);
    let view = View::new(zoom, center)?;
    let mut explorer = Explorer::new(renderer, width as usize, height as usize, view)?
        .with_policy(StalePolicy::Coalesce);

    // Queue the whole script up front; the explorer folds it into a
    // single render.
    let (tx, rx) = crossbeam::channel::unbounded();
    for command in commands {
        tx.send(command)?;
    }
    drop(tx);
    let frames = explorer.run(&rx, |_| ())?;
    info!("presented {} frame(s)", frames);

    let mut canvas = explorer.frame().clone();
    if matches.is_present(SPIRAL) {
        let middle = Vector2D::new(width as f64 / 2.0, height as f64 / 2.0);
        canvas.draw_spiral(Color::rgb(255, 255, 255), middle);
    }
    if let Some(radius) = matches.value_of(BLUR) {
        let weight = Weight::from_str(matches.value_of(WEIGHT).unwrap_or("box"))?;
        canvas.blur(usize::from_str(radius)?, &weight)?;
    }

    let output = matches.value_of(OUTPUT).unwrap_or("fractal.png");
    write_image(output, &canvas)?;
    info!(
        "wrote {} at zoom {} around {}",
        output,
        explorer.view().zoom(),
        explorer.view().center()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
