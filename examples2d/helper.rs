use fissure2d::dynamics::{ParticleRole, ParticleSet};
use fissure2d::geometry::PhaseFieldMesh;
use fissure2d::math::Real;
use fissure2d::pipelines::SnapshotWriter;
use std::path::{Path, PathBuf};

/// Writes one CSV file for the particles and one for the phase-field nodes
/// at every snapshot.
pub struct CsvSnapshotWriter {
    dir: PathBuf,
}

impl CsvSnapshotWriter {
    pub fn new(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    pub fn particles_path(&self, step_id: usize) -> PathBuf {
        self.dir.join(format!("particles_{:06}.csv", step_id))
    }

    pub fn phase_path(&self, step_id: usize) -> PathBuf {
        self.dir.join(format!("phase_{:06}.csv", step_id))
    }

    fn write_particles(&self, step_id: usize, particles: &ParticleSet) -> std::io::Result<()> {
        let mut wtr = csv::Writer::from_path(self.particles_path(step_id))?;
        wtr.write_record([
            "x", "y", "vx", "vy", "sxx", "syy", "sxy", "phase", "history", "group",
        ])?;

        for p in particles {
            let group = match p.role {
                ParticleRole::Deformable => "deformable",
                ParticleRole::Rigid => "rigid",
            };
            wtr.write_record([
                p.position.x.to_string(),
                p.position.y.to_string(),
                p.velocity.x.to_string(),
                p.velocity.y.to_string(),
                p.stress.x.to_string(),
                p.stress.y.to_string(),
                p.stress.z.to_string(),
                p.phase.to_string(),
                p.history.to_string(),
                group.to_string(),
            ])?;
        }

        wtr.flush()
    }

    fn write_phase(&self, step_id: usize, mesh: &PhaseFieldMesh) -> std::io::Result<()> {
        let mut wtr = csv::Writer::from_path(self.phase_path(step_id))?;
        wtr.write_record(["x", "y", "phase"])?;

        for (i, phase) in mesh.phase.iter().enumerate() {
            let pos = mesh.node_position(i);
            wtr.write_record([pos.x.to_string(), pos.y.to_string(), phase.to_string()])?;
        }

        wtr.flush()
    }
}

impl SnapshotWriter for CsvSnapshotWriter {
    fn write_snapshot(
        &mut self,
        step_id: usize,
        time: Real,
        particles: &ParticleSet,
        mesh: &PhaseFieldMesh,
    ) -> fissure2d::Result<()> {
        self.write_particles(step_id, particles)?;
        self.write_phase(step_id, mesh)?;
        info!("Snapshot {} (t = {}s) written to {:?}.", step_id, time, self.dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fissure2d::core::dynamics::models::MaterialParameters;
    use fissure2d::dynamics::Particle;
    use na::{point, vector};

    #[test]
    fn snapshots_are_written_as_csv() {
        let dir = std::env::temp_dir().join(format!("fissure2d-csv-{}", std::process::id()));
        let mut writer = CsvSnapshotWriter::new(&dir).unwrap();

        let material = MaterialParameters::new(1000.0, 1.0e7, 0.3);
        let mut particles = ParticleSet::new();
        particles.insert(Particle::deformable(point![0.1, 0.2], 1.0e-4, &material));
        particles.insert(Particle::rigid(point![0.3, 0.4], 1.0e-4, &material));
        let mesh = PhaseFieldMesh::new(point![0.0, 0.0], vector![1.0, 1.0], [2, 2]).unwrap();

        writer.write_snapshot(7, 0.5, &particles, &mesh).unwrap();

        let content = std::fs::read_to_string(writer.particles_path(7)).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "x,y,vx,vy,sxx,syy,sxy,phase,history,group");
        assert!(lines[1].starts_with("0.1,0.2,"));
        assert!(lines[2].ends_with(",rigid"));

        let mut rdr = csv::Reader::from_path(writer.particles_path(7)).unwrap();
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.len() == 10));
        assert_eq!(&records[0][9], "deformable");

        let content = std::fs::read_to_string(writer.phase_path(7)).unwrap();
        assert_eq!(content.lines().count(), 10);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
