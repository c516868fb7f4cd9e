fn main() -> anyhow::Result<()> {
    staff_board::cli::run()
}
