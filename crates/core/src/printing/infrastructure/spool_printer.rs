use std::path::{Path, PathBuf};

use crate::printing::domain::print_sink::{PrintJob, PrintSink};

/// Prints by dropping one PNG per copy into a spool directory that a
/// print daemon (or a person) picks up.
pub struct SpoolPrinter {
    dir: PathBuf,
    jobs: usize,
}

impl SpoolPrinter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            jobs: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PrintSink for SpoolPrinter {
    fn print(&mut self, job: &PrintJob) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&self.dir)?;

        let img = job.preview.to_rgba_image();
        self.jobs += 1;
        for copy in 1..=job.quantity.get() {
            let path = self
                .dir
                .join(format!("job{:04}-{}-copy{copy:02}.png", self.jobs, job.slot));
            img.save(&path)?;
            log::debug!("Spooled {}", path.display());
        }
        log::info!(
            "Sent {} to printer: {} cop{}",
            job.slot,
            job.quantity.get(),
            if job.quantity.get() == 1 { "y" } else { "ies" }
        );
        Ok(())
    }
}
