use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use clap::Parser;
use log::{info, warn};
use melee_core::{
    apply_pending_placement, find_pull_candidates, finish_group_pull, init_logging,
    perform_attack, prepare_group_pull, process_attack_hit, update_group_pull, Animator,
    AttackDefinition, AttackTable, ClipPlayer, CombatPlugin, Combatant, Locomotion,
    MovementMode, Pullable, ReceivesHits,
};

/// Headless melee combat walkthrough
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON attack table to load instead of the built-in one
    #[arg(long)]
    attacks: Option<PathBuf>,
    /// Attack code to perform
    #[arg(long, default_value = "grab")]
    code: String,
}

fn builtin_attacks() -> AttackTable {
    AttackTable::new()
        .with(
            "jab",
            AttackDefinition::new("jab_montage").with_reaction("flinch"),
        )
        .with(
            "grab",
            AttackDefinition::new("grab_montage")
                .with_reaction("grabbed")
                .with_placement(Transform::from_xyz(80.0, 0.0, 0.0).with_rotation(
                    Quat::from_rotation_z(std::f32::consts::PI),
                )),
        )
}

fn spawn_combatant(
    app: &mut App,
    attacks: &Arc<AttackTable>,
    at: Vec3,
    player: ClipPlayer,
) -> Entity {
    app.world_mut()
        .spawn((
            Combatant::new(Arc::clone(attacks)),
            Transform::from_translation(at),
            Animator::new(player),
            Locomotion::new(MovementMode::Walking),
            ReceivesHits,
        ))
        .id()
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !init_logging(args.verbose) {
        warn!("a logger was already installed; keeping it");
    }

    let attacks = match &args.attacks {
        Some(path) => AttackTable::from_path(path)
            .with_context(|| format!("loading attacks from {}", path.display()))?,
        None => builtin_attacks(),
    }
    .shared();
    let Some(animation) = attacks.attacker_animation(&args.code).cloned() else {
        bail!("attack '{}' has no attacker animation", args.code);
    };

    let mut app = App::new();
    app.add_plugins(CombatPlugin);

    let attacker_player = ClipPlayer::new();
    let attacker = spawn_combatant(&mut app, &attacks, Vec3::ZERO, attacker_player.clone());
    let victim = spawn_combatant(
        &mut app,
        &attacks,
        Vec3::new(100.0, 0.0, 0.0),
        ClipPlayer::new(),
    );
    spawn_combatant(
        &mut app,
        &attacks,
        Vec3::new(100.0, 5.0, 0.0),
        ClipPlayer::new(),
    );
    for at in [
        Vec3::new(120.0, 30.0, 0.0),
        Vec3::new(90.0, -40.0, 0.0),
        Vec3::new(140.0, 0.0, 10.0),
    ] {
        app.world_mut()
            .spawn((Transform::from_translation(at), Pullable));
    }

    let target = perform_attack(app.world_mut(), attacker, &args.code)
        .with_context(|| format!("performing '{}'", args.code))?;
    info!("selected target {target} (expected {victim})");

    let world = app.world_mut();
    process_attack_hit(world, attacker).context("delivering the hit")?;
    if apply_pending_placement(world, attacker) {
        let candidates = find_pull_candidates(world, attacker, 100.0, None);
        let pulled = prepare_group_pull(world, attacker, &candidates, Vec3::new(0.0, 0.0, 50.0))
            .context("starting the group pull")?;
        info!("pulling {pulled} entities");
        for step in 0..=4_u8 {
            update_group_pull(world, attacker, f32::from(step) / 4.0);
        }
        finish_group_pull(world, attacker);
    }

    app.update();
    if !attacker_player.complete(&animation) {
        bail!("attack animation {animation} was not playing");
    }
    app.update();

    let idle = app
        .world()
        .get::<Combatant>(attacker)
        .is_some_and(|combatant| !combatant.is_attacking());
    info!("attacker idle after animation end: {idle}");
    Ok(())
}
