use rangepicker::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
