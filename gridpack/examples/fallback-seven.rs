use gridpack::BentoPacker;

fn main() {
    env_logger::init();

    let packer = BentoPacker::new(6).unwrap();
    let output = packer.pack_count(7);

    println!("{:#?}", output.placements());
    println!("{}", output.diagram());
}
