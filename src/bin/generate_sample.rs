//! Writes synthetic Agilent-style C(V) sweeps (tab-separated, `!` comments)
//! into a directory, default `sample_data/`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Ferroelectric varactor response: `C(V) = C0 / (1 + (V / v_half)^2)^(1/3)`.
fn capacitance(bias: f64, c0: f64, v_half: f64) -> f64 {
    c0 / (1.0 + (bias / v_half).powi(2)).cbrt()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Device {
    name: &'static str,
    c0_pf: f64,
    v_half: f64,
    frequency_hz: f64,
}

fn write_sweep(dir: &Path, device: &Device, rng: &mut SimpleRng) -> Result<()> {
    let path = dir.join(format!("{}.txt", device.name));
    let mut file =
        std::fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "! Agilent 4294A  synthetic sweep")?;
    writeln!(file, "! device {}  osc 500 mV", device.name)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(file);
    writer.write_record(["Freq(Hz)", "DCB(V)", "Cp(F)", "Rp(Ohm)", "D"])?;

    // Up-sweep 0 → 25 V in 0.5 V steps, matching the instrument's list mode.
    for step in 0..=50 {
        let bias = step as f64 * 0.5;
        let freq = device.frequency_hz * (1.0 + rng.gauss(0.0, 1e-5));
        let cp_pf = capacitance(bias, device.c0_pf, device.v_half) * (1.0 + rng.gauss(0.0, 1e-3));
        let rp = 1e6 * (1.0 + rng.gauss(0.0, 0.05));
        let d = 1.0 / (2.0 * std::f64::consts::PI * freq * cp_pf * 1e-12 * rp);
        writer.write_record([
            format!("{freq:.6e}"),
            format!("{bias}"),
            format!("{:.6e}", cp_pf * 1e-12),
            format!("{rp:.6e}"),
            format!("{d:.4e}"),
        ])?;
    }
    writer.flush()?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "sample_data".into());
    let dir = Path::new(&out_dir);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let devices = [
        Device { name: "BST_A1", c0_pf: 12.0, v_half: 18.0, frequency_hz: 1e6 },
        Device { name: "BST_A2", c0_pf: 11.4, v_half: 16.5, frequency_hz: 1e6 },
        Device { name: "BST_B1", c0_pf: 13.1, v_half: 20.0, frequency_hz: 1e6 },
        // Measured at 1.01 MHz: triggers the cross-file frequency warning.
        Device { name: "BST_C1_off_freq", c0_pf: 12.5, v_half: 17.0, frequency_hz: 1.01e6 },
    ];
    for device in &devices {
        write_sweep(dir, device, &mut rng)?;
    }
    Ok(())
}
