//! Writes a travelling Gaussian pulse in the three dump layouts:
//! `sample_tabular.txt`, `sample_blocked.txt` and `sample_marker.txt`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const NX: usize = 200;
const STEPS: usize = 120;
const DT: f64 = 0.005;
const SPEED: f64 = 1.0;
const POLARIZATION_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// E total, Ex, Ey, H at grid point `x`, step `n`.
fn em_fields(x: f64, n: usize) -> [f64; 4] {
    let t = n as f64 * DT;
    let e = gaussian(x, 0.2 + SPEED * t, 0.05, 1.0);
    let h = e / 1.5;
    [e, e * POLARIZATION_ANGLE.cos(), e * POLARIZATION_ANGLE.sin(), h]
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_em(dir: &Path, name: &str, blank_between_steps: bool) -> Result<()> {
    let mut out = create(dir, name)?;
    writeln!(out, "Tiempo X E Ex Ey H")?;
    for n in 0..STEPS {
        let t = n as f64 * DT;
        for i in 0..NX {
            let x = i as f64 / NX as f64;
            let [e, ex, ey, h] = em_fields(x, n);
            writeln!(out, "{t} {x} {e} {ex} {ey} {h}")?;
        }
        if blank_between_steps {
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_wave(dir: &Path) -> Result<()> {
    let mut out = create(dir, "sample_marker.txt")?;
    let nx = NX + 1;
    for n in 0..STEPS {
        writeln!(out, "FRAME {n}")?;
        for j in 0..nx {
            let x = -100.0 + 200.0 * j as f64 / (nx - 1) as f64;
            let u = 0.5 * gaussian(x, -40.0 + n as f64, 8.0, 1.0)
                + 0.5 * gaussian(x, -40.0 - n as f64, 8.0, 1.0);
            write!(out, "{u:.6} ")?;
        }
        writeln!(out, "\n")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    write_em(&dir, "sample_tabular.txt", false)?;
    write_em(&dir, "sample_blocked.txt", true)?;
    write_wave(&dir)?;

    println!(
        "Wrote {STEPS} frames ({NX} samples each) in three layouts to {}",
        dir.display()
    );
    Ok(())
}
