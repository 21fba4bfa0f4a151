use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use as1130::config::{DEFAULT_ADDRESS, DEFAULT_CURRENT_SOURCE};
use as1130::{
    layout, render_text, Frame, FrameTime, Geometry, Movie, MovieMode, Picture, AS1130,
};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use linux_embedded_hal::{Delay, I2cdev};
use log::{debug, info};

const MAX_FLOW_WIDTH: u8 = 5;

/// CLI for controlling an AS1130 driver
#[derive(Debug, Parser)]
#[command(name = "as1130ctl", version)]
struct Args {
    /// I2C device path
    #[arg(
        short,
        long,
        env = "AS1130_DEVICE",
        default_value = "/dev/i2c-1",
        global = true
    )]
    device: PathBuf,

    /// I2C device address
    #[arg(
        short,
        long,
        env = "AS1130_ADDRESS",
        default_value_t = DEFAULT_ADDRESS,
        value_parser = parse_byte,
        global = true
    )]
    address: u8,

    /// Size of the LED matrix, 24x5 or 12x11
    #[arg(
        short,
        long,
        default_value_t = Geometry::Matrix24x5,
        value_parser = parse_size,
        global = true
    )]
    size: Geometry,

    /// Current for all LEDs in mA, max 30
    #[arg(short, long, default_value_t = DEFAULT_CURRENT_SOURCE, global = true)]
    current: u8,

    /// Log more, repeat for register level tracing
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Turn on specific LEDs
    ///
    /// x,y co-ordinates are 1-indexed. No co-ordinates will result in all
    /// LEDs being turned off.
    Leds {
        /// LED positions as x,y
        #[arg(value_name = "x,y")]
        positions: Vec<String>,

        /// Turn all LEDs on
        #[arg(long)]
        all: bool,

        /// Print the co-ordinates of all LEDs and exit
        #[arg(short, long)]
        layout: bool,
    },

    /// Scroll text across the display
    Text {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Display fading pattern using PWM
    ///
    /// This uses a different memory configuration so you may need to hard
    /// reset the device before or after using it for something different.
    Flow {
        /// Width of pattern in frames, max 5
        #[arg(short, long, default_value_t = 2)]
        width: u8,
    },

    /// Read data from a register
    ///
    /// This can be useful for debugging a running device.
    Read {
        #[arg(value_parser = parse_byte)]
        register: u8,

        #[arg(value_parser = parse_byte)]
        subregister: u8,
    },
}

type Device = AS1130<as1130::I2cAdapter<I2cdev>>;

fn parse_byte(arg: &str) -> Result<u8, String> {
    let (digits, radix) = if let Some(hex) = arg.strip_prefix("0x").or(arg.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(binary) = arg.strip_prefix("0b") {
        (binary, 2)
    } else if let Some(octal) = arg.strip_prefix("0o") {
        (octal, 8)
    } else {
        (arg, 10)
    };

    u8::from_str_radix(digits, radix).map_err(|e| format!("invalid byte {arg}: {e}"))
}

fn parse_size(arg: &str) -> Result<Geometry, String> {
    arg.parse::<Geometry>().map_err(|e| e.to_string())
}

/// Parses 1-indexed x,y positions into 0-indexed points. Every invalid
/// position is reported.
fn parse_leds(args: &[String], geometry: Geometry) -> Result<Vec<(u32, u32)>> {
    let mut points = Vec::new();
    let mut invalid = Vec::new();

    for arg in args {
        let point = match arg.split(',').collect::<Vec<_>>().as_slice() {
            [x, y] => x.parse::<u32>().ok().zip(y.parse::<u32>().ok()),
            _ => None,
        };

        match point {
            Some((x, y))
                if (1..=geometry.width()).contains(&x) && (1..=geometry.height()).contains(&y) =>
            {
                points.push((x - 1, y - 1));
            }
            _ => invalid.push(arg.as_str()),
        }
    }

    if !invalid.is_empty() {
        bail!("invalid LED positions: {}", invalid.join(" "));
    }

    Ok(points)
}

/// Table of 1-indexed co-ordinates, each column padded to its widest cell.
fn layout_table(geometry: Geometry) -> String {
    let widths: Vec<usize> = (1..=geometry.width())
        .map(|x| format!("{x},{}", geometry.height()).len())
        .collect();

    let mut table = String::new();
    for y in 1..=geometry.height() {
        table.push_str(" |");
        for (x, width) in (1..=geometry.width()).zip(&widths) {
            let cell = format!("{x},{y}");
            table.push_str(&format!(" {cell:<width$} |"));
        }
        table.push('\n');
    }

    table
}

fn lit(geometry: Geometry) -> Frame {
    let mut frame = Frame::new(geometry);
    frame.fill_luma(u8::MAX);
    frame
}

fn open(args: &Args, blink_and_pwm_sets: u8) -> Result<Device> {
    let i2c = I2cdev::new(&args.device)
        .with_context(|| format!("failed to open {}", args.device.display()))?;
    info!(
        "using AS1130 on {} at address {:#04x}",
        args.device.display(),
        args.address
    );

    let mut as1130 = AS1130::new_with_i2c_bus(i2c, args.address);
    as1130.reset(&mut Delay)?;
    as1130.init(blink_and_pwm_sets)?;
    if args.current != DEFAULT_CURRENT_SOURCE {
        as1130.set_current_source(args.current)?;
    }

    Ok(as1130)
}

fn leds(args: &Args, positions: &[String], all: bool) -> Result<()> {
    let points = parse_leds(positions, args.size)?;

    let mut frame = if all { lit(args.size) } else { Frame::new(args.size) };
    for (x, y) in points {
        frame.set_luma(x, y, u8::MAX);
    }

    let mut as1130 = open(args, 1)?;
    as1130.set_blink_and_pwm_set(1, &Frame::new(args.size), &lit(args.size))?;
    as1130.set_frame(1, &frame)?;
    as1130.set_picture(Picture {
        display: true,
        ..Default::default()
    })?;
    as1130.start()?;

    Ok(())
}

fn text(args: &Args, words: &[String]) -> Result<()> {
    if args.size != Geometry::Matrix24x5 {
        bail!("only 24x5 size is supported for this command");
    }

    let raster = render_text(&words.join(" "))?;
    let frames = layout(&raster)?;
    debug!("text takes {} frames", frames.len());

    let mut as1130 = open(args, 1)?;
    as1130.set_blink_and_pwm_set(1, &Frame::new(args.size), &lit(args.size))?;
    let count = as1130.set_frames(&frames)?;
    play(&mut as1130, count)
}

fn flow(args: &Args, width: u8) -> Result<()> {
    if width > MAX_FLOW_WIDTH {
        bail!("width cannot be greater than {MAX_FLOW_WIDTH}: {width}");
    }

    let mut as1130 = open(args, MAX_FLOW_WIDTH)?;

    let geometry = args.size;
    let no_blink = Frame::new(geometry);
    let midway = u32::from(width) * geometry.width() / 2;
    let mut pwm: u8 = 0;
    let mut columns = 0;

    for index in 1..=width {
        let step = (255 / midway) as u8;
        let mut frame = Frame::new(geometry);
        for x in 0..geometry.width() {
            columns += 1;
            pwm = if columns <= midway {
                pwm.wrapping_add(step)
            } else {
                pwm.wrapping_sub(step)
            };
            for y in 0..geometry.height() {
                frame.set_luma(x, y, pwm);
            }
        }

        as1130.set_blink_and_pwm_set(index, &no_blink, &frame)?;
        frame.set_pwm_set(index);
        as1130.set_frame(index, &frame)?;
    }

    let spacer = width + 1;
    as1130.set_frame(spacer, &Frame::new(geometry))?;
    play(&mut as1130, spacer)
}

/// Plays frames 1 to `frames` as a scrolling movie.
fn play(as1130: &mut Device, frames: u8) -> Result<()> {
    as1130.set_movie(Movie {
        display: true,
        ..Default::default()
    })?;
    as1130.set_movie_mode(MovieMode {
        frames,
        ..Default::default()
    })?;
    as1130.set_frame_time(FrameTime {
        scrolling: true,
        delay: 1,
        ..Default::default()
    })?;
    as1130.start()?;

    Ok(())
}

fn read(args: &Args, register: u8, subregister: u8) -> Result<()> {
    let i2c = I2cdev::new(&args.device)
        .with_context(|| format!("failed to open {}", args.device.display()))?;
    let mut as1130 = AS1130::new_with_i2c_bus(i2c, args.address);

    let data = as1130.read(register, subregister)?;
    println!("bin: {data:08b}");
    println!("hex: {data:#04x}");
    println!("dec: {data}");

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match &args.command {
        Command::Leds { layout: true, .. } => {
            print!("{}", layout_table(args.size));
            Ok(())
        }
        Command::Leds { positions, all, .. } => leds(&args, positions, *all),
        Command::Text { words } => text(&args, words),
        Command::Flow { width } => flow(&args, *width),
        Command::Read {
            register,
            subregister,
        } => read(&args, *register, *subregister),
    }
}
