use std::fs;
use std::path::PathBuf;

use auton_format::document::RoutineDocument;
use auton_format::{Mirror, Routine, Section, SlotId, codec};
use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use recorder::rig::NullDisplay;
use recorder::{LoadOutcome, Player, RecorderConfig, Session, SlotStore, selector};
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::dry_run::DryRunRig;
use self::summary::Summary;

mod dry_run;
mod summary;

/// Maintenance of the saved autonomous routines.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Configuration file. Defaults to the per-user configuration directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the storage directory from the configuration.
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Slots are written `1`..`10`, `skills` or `p0`..`p3`. Outside of `play`
/// and `import`, `skills` stands for its first section, or all four for `clear`.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Every slot and skills section with its status.
    List,
    /// Per-channel ranges of a saved routine.
    Show {
        slot: SlotId,
        /// Print every sample.
        #[arg(long)]
        ticks: bool,
    },
    /// Writes a saved routine as JSON.
    Export { slot: SlotId, file: PathBuf },
    /// Saves a JSON routine into a slot.
    Import { file: PathBuf, slot: SlotId },
    /// Deletes the file behind a slot.
    Clear { slot: SlotId },
    /// Plays a slot without real motors or real time and summarizes it.
    Play {
        slot: SlotId,
        #[arg(long)]
        mirror: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let mut config =
        RecorderConfig::resolve(cli.config.as_deref()).wrap_err("failed to read configuration")?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},auton_tool=info", config.log_filter).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = SlotStore::open(&config.storage_dir).wrap_err_with(|| {
        format!("cannot open storage dir {}", config.storage_dir.display())
    })?;

    match cli.command {
        Commands::List => {
            for slot in SlotId::stored() {
                let name = slot.file_name().unwrap_or_default();
                println!("{name}\t{}", selector::label(slot, &store));
            }
        }
        Commands::Show { slot, ticks } => {
            let routine = read_routine(&store, slot)?;
            if ticks {
                println!("tick\tspeed\tstrafe\tturn\taux\tlift");
                for (tick, sample) in routine.iter().enumerate() {
                    let [speed, strafe, turn, aux, lift] = sample.channels();
                    println!("{tick}\t{speed}\t{strafe}\t{turn}\t{aux}\t{lift}");
                }
            }
            print!("{}", Summary::of(routine.iter().copied()));
        }
        Commands::Export { slot, file } => {
            let routine = read_routine(&store, slot)?;
            let json = RoutineDocument::new(&routine, Some(slot)).to_json()?;
            fs::write(&file, json).wrap_err_with(|| format!("cannot write {}", file.display()))?;
            info!(%slot, file = %file.display(), "exported routine");
        }
        Commands::Import { file, slot } => {
            let text = fs::read_to_string(&file)
                .wrap_err_with(|| format!("cannot read {}", file.display()))?;
            let routine = RoutineDocument::from_json(&text)
                .and_then(RoutineDocument::into_routine)
                .wrap_err_with(|| format!("{} is not a routine document", file.display()))?;

            let mut session = Session::new(store, config.default_slot);
            session.set_routine(routine);
            let outcome = session.save(slot, &mut NullDisplay)?;
            info!(?outcome, file = %file.display(), "imported routine");
        }
        Commands::Clear { slot } => {
            for file_slot in backing_slots(slot) {
                if store.delete(file_slot)? {
                    println!("cleared {file_slot}");
                } else {
                    println!("{file_slot} was already empty");
                }
            }
        }
        Commands::Play { slot, mirror } => {
            let mut session = Session::new(store, config.default_slot);
            let mut rig = DryRunRig::default();
            if let LoadOutcome::NothingSaved(_) = session.load(slot, &mut rig)? {
                bail!("nothing saved in {slot}");
            }
            let mirror = if mirror {
                Mirror::Mirrored
            } else {
                Mirror::Normal
            };
            let report = Player::new(mirror).play(&mut session, &mut rig)?;
            println!(
                "played {} ticks over {} section(s), {:.1}s on the robot",
                report.ticks_played,
                report.sections_played,
                rig.elapsed().as_secs_f32()
            );
            print!("{}", rig.summary());
        }
    }

    Ok(())
}

/// Files behind a slot argument. The skills aggregate has none of its own.
fn backing_slots(slot: SlotId) -> Vec<SlotId> {
    match slot {
        SlotId::Skills => Section::all().map(SlotId::Section).collect(),
        _ => vec![slot],
    }
}

fn read_routine(store: &SlotStore, slot: SlotId) -> Result<Routine> {
    let slot = match slot {
        SlotId::Skills => SlotId::Section(Section::FIRST),
        _ => slot,
    };
    let bytes = store.read(slot)?;
    codec::decode(&bytes).wrap_err_with(|| format!("{slot} holds a malformed log"))
}

#[cfg(test)]
mod tests {
    use super::{backing_slots, read_routine};
    use auton_format::{Routine, Sample, SlotId, codec};
    use recorder::SlotStore;

    #[test]
    fn skills_argument_reaches_its_sections() {
        assert_eq!(
            backing_slots(SlotId::Skills),
            ["p0", "p1", "p2", "p3"].map(|name| name.parse::<SlotId>().unwrap())
        );
        let slot = SlotId::regular(4).unwrap();
        assert_eq!(backing_slots(slot), [slot]);
    }

    #[test]
    fn skills_reads_first_section() {
        let dir = tempfile::tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        let routine = Routine::from_fn(|tick| Sample::new(0, 0, (tick % 50) as i8, 0, 1));
        store
            .replace(SlotId::section(0).unwrap(), &codec::encode(&routine))
            .unwrap();

        assert_eq!(read_routine(&store, SlotId::Skills).unwrap(), routine);
        assert!(read_routine(&store, SlotId::section(1).unwrap()).is_err());
    }
}
