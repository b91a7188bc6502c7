use checkers_engine::protocol;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    protocol::run_loop();
}
