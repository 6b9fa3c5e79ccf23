use clap::CommandFactory;
include!("src/cli.rs");
fn main() -> Result<(), std::io::Error> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-env-changed=MAN_PAGE_DIR");
    let out_dir = match std::env::var_os("MAN_PAGE_DIR") {
        Some(dir) => std::path::PathBuf::from(dir),
        None => return Ok(()),
    };
    println!("out_dir: {:?}", out_dir);

    let mut cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd.clone());
    let mut buffer: Vec<u8> = Default::default();
    man.render(&mut buffer)?;

    match std::fs::write(out_dir.join("mq-basic-publish.1"), buffer) {
        Ok(_) => {
            println!("file written");
        }
        Err(e) => {
            println!("error writing file: {}", e);
        }
    };

    let bash_completion_file = out_dir.join("mq-basic-publish.bash");

    let mut file = std::fs::File::create(bash_completion_file)?;

    let bin_name = "mq-basic-publish";
    clap_complete::generate(clap_complete::shells::Bash, &mut cmd, bin_name, &mut file);
    Ok(())
}
