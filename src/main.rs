// main.rs      floodgif command
//
// Copyright (c) 2019-2025  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use floodgif::fill::{pixel_at, recommended_interval};
use floodgif::{encode_to, FloodFill, Image, Point, Strategy};
use log::warn;
use pix::rgb::{Rgb, SRgb8};
use std::error::Error;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::Write;
use std::time::Instant;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &str = std::env!("CARGO_PKG_VERSION");

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    match create_app().get_matches().subcommand() {
        ("fill", Some(matches)) => fill(&mut out, matches)?,
        ("info", Some(matches)) => info(&mut out, matches)?,
        _ => unreachable!(),
    }
    out.reset()?;
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("floodgif")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("Flood fill an image, recorded as an animated GIF")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("fill")
                .about("Fill a region and write the animation")
                .arg(Arg::with_name("input").required(true).help("input image"))
                .arg(
                    Arg::with_name("seed")
                        .short("s")
                        .long("seed")
                        .takes_value(true)
                        .value_name("X,Y")
                        .required(true)
                        .help("seed pixel coordinates"),
                )
                .arg(
                    Arg::with_name("color")
                        .short("c")
                        .long("color")
                        .takes_value(true)
                        .value_name("COLOR")
                        .default_value("red")
                        .help("fill color: red, green, blue or R,G,B"),
                )
                .arg(
                    Arg::with_name("strategy")
                        .long("strategy")
                        .takes_value(true)
                        .possible_values(&["bfs", "dfs", "queue", "stack"])
                        .default_value("bfs")
                        .help("traversal order"),
                )
                .arg(
                    Arg::with_name("interval")
                        .short("i")
                        .long("interval")
                        .takes_value(true)
                        .value_name("PIXELS")
                        .help("painted pixels per frame"),
                )
                .arg(
                    Arg::with_name("delay")
                        .short("d")
                        .long("delay")
                        .takes_value(true)
                        .value_name("MS")
                        .default_value("100")
                        .help("delay between frames (milliseconds)"),
                )
                .arg(
                    Arg::with_name("no-loop")
                        .long("no-loop")
                        .help("play the animation only once"),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .value_name("FILE")
                        .default_value("fill.gif")
                        .help("output GIF file"),
                ),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Show image information")
                .arg(Arg::with_name("input").required(true).help("input image"))
                .arg(
                    Arg::with_name("at")
                        .long("at")
                        .takes_value(true)
                        .value_name("X,Y")
                        .help("show the color of one pixel"),
                ),
        )
}

/// Handle fill subcommand
fn fill(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let mut green = ColorSpec::new();
    green.set_fg(Some(Color::Green)).set_intense(true);
    let path = matches.value_of_os("input").ok_or("missing input")?;
    let mut image = load_image(path)?;
    let seed = parse_point(matches.value_of("seed").ok_or("missing seed")?)?;
    let color = parse_color(matches.value_of("color").unwrap_or("red"))?;
    let strategy = matches
        .value_of("strategy")
        .and_then(Strategy::from_name)
        .unwrap_or_default();
    let minimum = recommended_interval(image.width(), image.height());
    let interval = match matches.value_of("interval") {
        Some(v) => v.parse::<usize>()?,
        None => minimum,
    };
    if interval < minimum {
        warn!("interval {} below recommended {}", interval, minimum);
    }
    let delay_ms = matches.value_of("delay").unwrap_or("100").parse::<u32>()?;
    if delay_ms == 0 {
        return Err("delay must be positive".into());
    }
    let loop_forever = !matches.is_present("no-loop");
    let output = matches.value_of_os("output").unwrap_or(OsStr::new("fill.gif"));
    write_image_info(out, path, &image)?;
    let current = pixel_at(&image, seed)?;
    out.set_color(&bold)?;
    writeln!(out, "Strategy: {}", strategy)?;
    writeln!(out, "Seed {} color: {}", seed, format_color(current))?;
    let start = Instant::now();
    let frames = FloodFill::new(strategy)
        .with_frame_interval(interval)
        .run(&mut image, seed, color)?;
    writeln!(out, "Filled in {} ms", start.elapsed().as_millis())?;
    writeln!(out, "Frames: {}", frames.len())?;
    let file = File::create(output)?;
    if let Err(e) = encode_to(file, &frames, delay_ms, loop_forever) {
        // truncated output is useless
        fs::remove_file(output)?;
        return Err(e.into());
    }
    out.set_color(&green)?;
    writeln!(out, "Wrote {:?}", output)?;
    Ok(())
}

/// Handle info subcommand
fn info(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let path = matches.value_of_os("input").ok_or("missing input")?;
    let image = load_image(path)?;
    write_image_info(out, path, &image)?;
    if let Some(at) = matches.value_of("at") {
        let pt = parse_point(at)?;
        let clr = pixel_at(&image, pt)?;
        writeln!(out, "Pixel {}: {}", pt, format_color(clr))?;
    }
    Ok(())
}

/// Write image dimensions and recommended frame interval
fn write_image_info(
    out: &mut StandardStream,
    path: &OsStr,
    image: &Image,
) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let (width, height) = (image.width(), image.height());
    out.set_color(&magenta)?;
    writeln!(out, "{:?}", path)?;
    out.set_color(&yellow)?;
    let pixels = u64::from(width) * u64::from(height);
    writeln!(out, "Size: {}x{} ({} pixels)", width, height, pixels)?;
    writeln!(
        out,
        "Recommended interval: {} pixels",
        recommended_interval(width, height)
    )?;
    Ok(())
}

/// Load an image file
fn load_image(path: &OsStr) -> Result<Image, Box<dyn Error>> {
    let rgb = image::open(path)?.to_rgb8();
    let mut raster = Image::with_clear(rgb.width(), rgb.height());
    for (x, y, p) in rgb.enumerate_pixels() {
        let [red, green, blue] = p.0;
        *raster.pixel_mut(x as i32, y as i32) = SRgb8::new(red, green, blue);
    }
    Ok(raster)
}

/// Parse a point as "X,Y"
fn parse_point(v: &str) -> Result<Point, Box<dyn Error>> {
    let mut vals = v.split(',').map(|c| c.trim().parse::<i32>());
    match (vals.next(), vals.next(), vals.next()) {
        (Some(x), Some(y), None) => Ok(Point::new(x?, y?)),
        _ => Err(format!("invalid point: {}", v).into()),
    }
}

/// Parse a color name or "R,G,B"
fn parse_color(v: &str) -> Result<SRgb8, Box<dyn Error>> {
    match v.to_ascii_lowercase().as_str() {
        "red" => Ok(SRgb8::new(255, 0, 0)),
        "green" => Ok(SRgb8::new(0, 255, 0)),
        "blue" => Ok(SRgb8::new(0, 0, 255)),
        _ => {
            let mut vals = v.split(',').map(|c| c.trim().parse::<u8>());
            match (vals.next(), vals.next(), vals.next(), vals.next()) {
                (Some(r), Some(g), Some(b), None) => {
                    Ok(SRgb8::new(r?, g?, b?))
                }
                _ => Err(format!("invalid color: {}", v).into()),
            }
        }
    }
}

/// Format a color as "R=r, G=g, B=b"
fn format_color(clr: SRgb8) -> String {
    format!(
        "R={}, G={}, B={}",
        u8::from(Rgb::red(clr)),
        u8::from(Rgb::green(clr)),
        u8::from(Rgb::blue(clr))
    )
}
