//! Export helpers for CSV and JSON artifacts.

pub mod trajectory {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    pub const HEADER: &str = "step,time,x,y,z,vx,vy,vz,altitude_km,speed";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the trajectory exporter.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub step: usize,
        pub time: f64,
        pub position: [f64; 3],
        pub velocity: [f64; 3],
        pub altitude_km: f64,
        pub speed: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching [`HEADER`] ordering.
        ///
        /// Floats use Rust's shortest round-trip formatting so the file reads back exactly.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:?},{:?},{:?},{:?},{:?},{:?},{:?},{:.6},{:?}",
                self.step,
                self.time,
                self.position[0],
                self.position[1],
                self.position[2],
                self.velocity[0],
                self.velocity[1],
                self.velocity[2],
                self.altitude_km,
                self.speed,
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// JSON envelope describing a finished propagation run.
    #[derive(Debug, Clone, Serialize)]
    pub struct RunSummary {
        pub scenario: String,
        pub dt: f64,
        pub steps_requested: usize,
        pub steps_taken: usize,
        pub steps_skipped: usize,
        pub elapsed_time: f64,
        pub drag_applied: bool,
        pub initial_position: [f64; 3],
        pub initial_velocity: [f64; 3],
        pub final_position: [f64; 3],
        pub final_velocity: [f64; 3],
        pub final_altitude_km: f64,
        pub energy_drift: Option<f64>,
        pub sample_count: usize,
    }

    /// Write the summary as pretty-printed JSON, creating parent directories.
    pub fn write_summary(output: &Path, summary: &RunSummary) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(output)?, summary)?;
        Ok(())
    }
}
