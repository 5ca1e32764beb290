use crate::core::config::GameConfig;
use bevy::prelude::*;

#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

/// Exits after `window.autoClose` seconds; used for unattended smoke runs.
pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_autoclose)
            .add_systems(Update, check_autoclose);
    }
}

fn setup_autoclose(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time>,
    timer: Option<ResMut<AutoCloseTimer>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    let Some(mut t) = timer else {
        return;
    };
    if t.tick(time.delta()).just_finished() {
        info!("AutoClose: timer finished, requesting app exit");
        ev_exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_by_default() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<GameConfig>()
            .add_plugins(AutoClosePlugin);
        app.update();
        assert!(!app.world().contains_resource::<AutoCloseTimer>());
    }

    #[test]
    fn timer_installed_when_configured() {
        let mut cfg = GameConfig::default();
        cfg.window.auto_close = 2.5;
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(cfg)
            .add_plugins(AutoClosePlugin);
        app.update();
        let timer = app.world().resource::<AutoCloseTimer>();
        assert_eq!(timer.duration().as_secs_f32(), 2.5);
    }
}
