use clap::Parser;
use wasm_bindgen::prelude::*;

mod engine;
mod game;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Options come from the location hash, e.g. `#--endpoint=/api/game&-vv`.
fn parse_args(location_hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let (args, invalid) = match parse_args(&location_hash) {
        Ok(args) => (args, None),
        Err(err) => (Args::parse_from([""]), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = invalid {
        log::warn!("ignoring location options {:?}: {}", location_hash, err);
    }
    log::debug!("options: {:?}", args.game);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_match_core::Pacing;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_args("").unwrap();
        assert_eq!(args.game.endpoint, "/game");
        assert_eq!(args.game.pacing(), Pacing::default());
    }

    #[test]
    fn hash_options_override_defaults() {
        let args = parse_args("#--endpoint=/api/game&--match-delay=20&--mismatch-delay=40").unwrap();
        assert_eq!(args.game.endpoint, "/api/game");
        assert_eq!(
            args.game.pacing(),
            Pacing {
                match_delay_ms: 20,
                mismatch_delay_ms: 40,
            }
        );
    }

    #[test]
    fn unknown_options_are_reported() {
        assert!(parse_args("#--seed=4").is_err());
    }
}
