use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fsmplay::{DotSurface, Player, PlayerConfig, Scene, SceneEntry, VirtualClock};

#[derive(Parser, Debug)]
#[command(name = "fsmplay", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every cursor position of each player as a DOT file.
    Frames(FramesArgs),
    /// Autoplay one player until it stops, printing each frame as DOT.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Only this player (0-based index into the scene).
    #[arg(long)]
    player: Option<usize>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Player to run (0-based index into the scene).
    #[arg(long, default_value_t = 0)]
    player: usize,

    /// Player to run, by mount selector (e.g. `#fsm-choice`).
    #[arg(long, conflicts_with = "player")]
    selector: Option<String>,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sleep between ticks instead of advancing the clock instantly.
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn read_scene(path: &Path) -> anyhow::Result<Scene> {
    let scene =
        Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))?;
    scene.validate()?;
    Ok(scene)
}

fn pick(scene: &Scene, index: usize) -> anyhow::Result<&SceneEntry> {
    scene.players.get(index).with_context(|| {
        format!(
            "player index {index} out of range (scene has {})",
            scene.players.len()
        )
    })
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let entries: Vec<&SceneEntry> = match args.player {
        Some(i) => vec![pick(&scene, i)?],
        None => scene.players.iter().collect(),
    };

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    for entry in entries {
        let mut player = Player::new(
            entry.mount.clone(),
            entry.timeline.to_timeline(),
            DotSurface::new(),
            VirtualClock::new(),
            PlayerConfig::default(),
        )?;
        while !player.timeline().finished() {
            player.step_forward()?;
        }

        let slug = entry.mount.slug();
        for (i, dot) in player.surface_mut().take_frames().into_iter().enumerate() {
            let path = args.out.join(format!("{slug}-{i:03}.dot"));
            std::fs::write(&path, dot)
                .with_context(|| format!("write dot '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let entry = match &args.selector {
        Some(sel) => scene
            .find(sel)
            .with_context(|| format!("no player mounted at '{sel}'"))?,
        None => pick(&scene, args.player)?,
    };
    let config = match &args.config {
        Some(p) => PlayerConfig::from_path(p)?,
        None => PlayerConfig::default(),
    };

    let mut player = Player::new(
        entry.mount.clone(),
        entry.timeline.to_timeline(),
        DotSurface::new(),
        VirtualClock::new(),
        config,
    )?;

    player.toggle()?;
    print_frames(&mut player);
    while let Some(wait) = player.clock().until_next() {
        if args.realtime {
            std::thread::sleep(wait);
        }
        player.pump(wait)?;
        print_frames(&mut player);
    }

    let p = player.progress();
    eprintln!("stopped at {}/{}", p.pos + 1, p.length);
    Ok(())
}

fn print_frames(player: &mut Player<DotSurface>) {
    let fill = player.surface().fill();
    for dot in player.surface_mut().take_frames() {
        println!("// progress {:.0}%", fill * 100.0);
        print!("{dot}");
    }
}
