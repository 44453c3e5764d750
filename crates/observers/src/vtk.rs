//! Legacy VTK output of the fluid state.
//!
//! Files are ASCII `RECTILINEAR_GRID` datasets on the node coordinates, with
//! a `relative_pressure` scalar and a `velocity_vector` vector per node, in
//! node order. [`VtkWriter`] writes one such file every few steps of a run.

mod error;

pub use error::Error;

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use lbm2d_core::{FluidField, Observer, Topology};

use crate::traits::{CanStopEarly, HasField};

/// Writes `field` as a legacy ASCII VTK rectilinear grid.
///
/// # Errors
///
/// Returns [`Error::FieldLength`] if the field does not cover every node of
/// the topology, or [`Error::Io`] if writing fails.
pub fn write_vtk<W: Write>(mut writer: W, topology: &Topology, field: &FluidField) -> Result<(), Error> {
    let (nx, ny) = (topology.nx(), topology.ny());
    let nodes = topology.node_count();
    if field.pressure.len() != nodes || field.velocity.len() != nodes {
        return Err(Error::FieldLength {
            expected: nodes,
            pressure: field.pressure.len(),
            velocity: field.velocity.len(),
        });
    }

    writeln!(writer, "# vtk DataFile Version 3.0")?;
    writeln!(writer, "fluid_state")?;
    writeln!(writer, "ASCII")?;
    writeln!(writer, "DATASET RECTILINEAR_GRID")?;
    writeln!(writer, "DIMENSIONS {nx} {ny} 1")?;

    writeln!(writer, "X_COORDINATES {nx} float")?;
    writeln!(writer, "{}", coordinates(nx))?;
    writeln!(writer, "Y_COORDINATES {ny} float")?;
    writeln!(writer, "{}", coordinates(ny))?;
    writeln!(writer, "Z_COORDINATES 1 float")?;
    writeln!(writer, "0")?;

    writeln!(writer, "POINT_DATA {nodes}")?;
    writeln!(writer, "SCALARS relative_pressure float")?;
    writeln!(writer, "LOOKUP_TABLE default")?;
    for p in &field.pressure {
        writeln!(writer, "{p}")?;
    }

    writeln!(writer, "VECTORS velocity_vector float")?;
    for [ux, uy] in &field.velocity {
        writeln!(writer, "{ux} {uy} 0")?;
    }

    writer.flush()?;
    Ok(())
}

fn coordinates(count: usize) -> String {
    (0..count)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes `fluid_t{step}.vtk` files into an output directory during a run.
///
/// A file is written for every event whose step is a multiple of the
/// interval. If a write fails the run is stopped early and the error is
/// returned by [`VtkWriter::finish`].
#[derive(Debug)]
pub struct VtkWriter {
    dir: PathBuf,
    topology: Topology,
    interval: usize,
    written: Vec<PathBuf>,
    error: Option<Error>,
}

impl VtkWriter {
    /// Creates a writer for `dir`, creating the directory if needed and
    /// removing any `.vtk` files already in it.
    ///
    /// An `interval` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prepare`] if the directory cannot be created or
    /// cleared.
    pub fn new(dir: impl Into<PathBuf>, topology: Topology, interval: usize) -> Result<Self, Error> {
        let dir = dir.into();
        prepare_dir(&dir).map_err(|source| Error::Prepare {
            path: dir.clone(),
            source,
        })?;
        log::debug!("writing VTK output to {}", dir.display());

        Ok(Self {
            dir,
            topology,
            interval: interval.max(1),
            written: Vec::new(),
            error: None,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the file for `step`.
    #[must_use]
    pub fn path_for(&self, step: usize) -> PathBuf {
        self.dir.join(format!("fluid_t{step}.vtk"))
    }

    /// Returns the files written so far, in order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Writes the file for `step`, replacing it if it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the file cannot be written, or
    /// [`Error::FieldLength`] if the field does not match the grid.
    pub fn write_step(&mut self, step: usize, field: &FluidField) -> Result<PathBuf, Error> {
        let path = self.path_for(step);
        write_file(&path, &self.topology, field)?;
        log::debug!("wrote {}", path.display());

        if self.written.last() != Some(&path) {
            self.written.push(path.clone());
        }
        Ok(path)
    }

    /// Consumes the writer, returning the files written or the error that
    /// stopped the run.
    ///
    /// # Errors
    ///
    /// Returns the first write error encountered while observing.
    pub fn finish(self) -> Result<Vec<PathBuf>, Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.written),
        }
    }

    /// Like [`finish`](Self::finish), but first writes the final state at
    /// `step` if the run ended between intervals.
    ///
    /// Nothing more is written once a write has failed.
    ///
    /// # Errors
    ///
    /// Returns the first write error encountered while observing, or the
    /// error from writing the final state.
    pub fn finish_with(mut self, step: usize, field: &FluidField) -> Result<Vec<PathBuf>, Error> {
        if self.error.is_none() && !self.written.contains(&self.path_for(step)) {
            self.write_step(step, field)?;
        }
        self.finish()
    }
}

impl<E: HasField, A: CanStopEarly> Observer<E, A> for VtkWriter {
    fn observe(&mut self, event: &E) -> Option<A> {
        if self.error.is_some() {
            return Some(A::stop_early());
        }

        let step = event.step();
        if step % self.interval != 0 {
            return None;
        }

        match self.write_step(step, event.field()) {
            Ok(_) => None,
            Err(err) => {
                log::error!("stopping run at step {step}: {err}");
                self.error = Some(err);
                Some(A::stop_early())
            }
        }
    }
}

fn prepare_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "vtk") {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn write_file(path: &Path, topology: &Topology, field: &FluidField) -> Result<(), Error> {
    let to_write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_write_error)?;
    write_vtk(BufWriter::new(file), topology, field).map_err(|err| match err {
        Error::Io(source) => to_write_error(source),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use lbm2d_solvers::{
        Collision, Simulation, Stream,
        simulation::{Action, Event, Status},
    };

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lbm2d-vtk-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_rectilinear_grid() {
        let topology = Topology::d2q9(2, 2, 1.0, 1.0).unwrap();
        let field = FluidField {
            pressure: vec![0.0, 0.5, -0.25, 1.0],
            velocity: vec![[0.1, 0.0], [0.0, -0.2], [0.0, 0.0], [1.5, 2.0]],
        };

        let mut out = Vec::new();
        write_vtk(&mut out, &topology, &field).unwrap();

        let expected = "\
# vtk DataFile Version 3.0
fluid_state
ASCII
DATASET RECTILINEAR_GRID
DIMENSIONS 2 2 1
X_COORDINATES 2 float
0 1
Y_COORDINATES 2 float
0 1
Z_COORDINATES 1 float
0
POINT_DATA 4
SCALARS relative_pressure float
LOOKUP_TABLE default
0
0.5
-0.25
1
VECTORS velocity_vector float
0.1 0 0
0 -0.2 0
0 0 0
1.5 2 0
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn rejects_field_without_pressure() {
        let topology = Topology::d2q9(2, 2, 1.0, 1.0).unwrap();
        let field = FluidField::uniform(&topology, [0.0, 0.0]);

        let err = write_vtk(Vec::new(), &topology, &field).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldLength {
                expected: 4,
                pressure: 0,
                velocity: 4
            }
        ));
    }

    #[test]
    fn clears_stale_output_only() {
        let dir = scratch_dir("clear");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("fluid_t99.vtk"), "old").unwrap();
        fs::write(dir.join("notes.txt"), "keep").unwrap();

        let topology = Topology::d2q9(2, 2, 1.0, 1.0).unwrap();
        let writer = VtkWriter::new(&dir, topology, 1).unwrap();

        assert!(!dir.join("fluid_t99.vtk").exists());
        assert!(dir.join("notes.txt").exists());
        assert_eq!(writer.dir(), dir.as_path());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn writes_every_interval_during_a_run() {
        let dir = scratch_dir("run");
        let topology = Topology::d2q9(4, 3, 1.0, 1.0).unwrap();
        let collision = Collision::bgk(&topology, 0.1, 1.0).unwrap();
        let stream = Stream::new(&topology).unwrap();
        let field = FluidField::uniform(&topology, [0.01, 0.0]);
        let mut sim = Simulation::new(topology, collision, stream, field).unwrap();

        let mut writer = VtkWriter::new(&dir, topology, 2).unwrap();
        let solution = sim
            .run(5, |event: &Event<'_>| -> Option<Action> { writer.observe(event) })
            .unwrap();
        assert_eq!(solution.status, Status::Complete);

        let written = writer.finish().unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["fluid_t0.vtk", "fluid_t2.vtk", "fluid_t4.vtk"]);

        let contents = fs::read_to_string(&written[2]).unwrap();
        assert!(contents.contains("DIMENSIONS 4 3 1"));
        assert_eq!(contents.lines().count(), 15 + 2 * 12);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_failure_stops_the_run() {
        let dir = scratch_dir("fail");
        let topology = Topology::d2q9(2, 2, 1.0, 1.0).unwrap();
        let mut writer = VtkWriter::new(&dir, topology, 1).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        let field = FluidField {
            pressure: vec![0.0; 4],
            velocity: vec![[0.0; 2]; 4],
        };
        let density = [1.0; 4];
        let event = Event {
            step: 0,
            field: &field,
            density: &density,
        };

        let action: Option<Action> = writer.observe(&event);
        assert_eq!(action, Some(Action::StopEarly));
        assert!(matches!(writer.finish(), Err(Error::Write { .. })));
    }

    #[test]
    fn finish_with_keeps_the_first_write_error() {
        let dir = scratch_dir("fail-final");
        let topology = Topology::d2q9(2, 2, 1.0, 1.0).unwrap();
        let mut writer = VtkWriter::new(&dir, topology, 1).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        let field = FluidField {
            pressure: vec![0.0; 4],
            velocity: vec![[0.0; 2]; 4],
        };
        let density = [1.0; 4];
        let event = Event {
            step: 0,
            field: &field,
            density: &density,
        };
        let _: Option<Action> = writer.observe(&event);

        // A retry would now succeed, so any error must be the original one.
        fs::create_dir_all(&dir).unwrap();
        let final_path = writer.path_for(3);

        match writer.finish_with(3, &field) {
            Err(Error::Write { path, .. }) => assert!(path.ends_with("fluid_t0.vtk")),
            other => panic!("expected the step 0 write error, got {other:?}"),
        }
        assert!(!final_path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn finish_with_writes_an_off_interval_final_step_once() {
        let dir = scratch_dir("final");
        let topology = Topology::d2q9(2, 2, 1.0, 1.0).unwrap();
        let field = FluidField {
            pressure: vec![0.0; 4],
            velocity: vec![[0.0; 2]; 4],
        };

        let mut writer = VtkWriter::new(&dir, topology, 4).unwrap();
        writer.write_step(4, &field).unwrap();
        let files = writer.finish_with(4, &field).unwrap();
        assert_eq!(files, [dir.join("fluid_t4.vtk")]);

        let mut writer = VtkWriter::new(&dir, topology, 4).unwrap();
        writer.write_step(4, &field).unwrap();
        let files = writer.finish_with(6, &field).unwrap();
        assert_eq!(files, [dir.join("fluid_t4.vtk"), dir.join("fluid_t6.vtk")]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
