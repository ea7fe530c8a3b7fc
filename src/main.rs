use clap::{Arg, Command, ArgAction};
use log::{debug, info};

use std::{fmt, fs, io, path::{Path, PathBuf}, process, sync::Arc};

use threefish::{
    BlockSize,
    CipherError,
    CipherProcessor,
    Threefish,
    random_bytes,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Ecb,
    Cbc,
}

struct Args {
    decipher: bool,
    generate: bool,
    block_size: BlockSize,
    mode: Mode,
    threads: usize,
    key: PathBuf,
    iv: Option<PathBuf>,
    output: PathBuf,
    source: PathBuf,
}

#[derive(Debug)]
enum ToolError {
    Read(PathBuf, io::Error),
    Write(PathBuf, io::Error),
    Cipher(CipherError),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Read(path, e) => write!(f, "Cannot read {}: {}", path.display(), e),
            ToolError::Write(path, e) => write!(f, "Cannot write {}: {}", path.display(), e),
            ToolError::Cipher(e) => write!(f, "{}", e),
        }
    }
}

impl From<CipherError> for ToolError {
    fn from(e: CipherError) -> Self {
        ToolError::Cipher(e)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ToolError> {
    fs::read(path).map_err(|e| ToolError::Read(path.to_owned(), e))
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), ToolError> {
    fs::write(path, data).map_err(|e| ToolError::Write(path.to_owned(), e))
}

/// Loads key material and IV, or creates them when `--generate` is set.
fn load_secrets(args: &Args) -> Result<(Vec<u8>, Option<Vec<u8>>), ToolError> {
    if args.generate {
        let material = random_bytes(args.block_size.key_material_size());
        write_file(&args.key, &material)?;
        println!("Generated key material: {}", args.key.display());

        let iv = match &args.iv {
            Some(path) => {
                let iv = random_bytes(args.block_size.bytes());
                write_file(path, &iv)?;
                println!("Generated initialization vector: {}", path.display());
                Some(iv)
            }
            None => None,
        };

        return Ok((material, iv));
    }

    let material = read_file(&args.key)?;
    let iv = match &args.iv {
        Some(path) => Some(read_file(path)?),
        None => None,
    };

    Ok((material, iv))
}

fn get_processor(args: &Args, material: &[u8], iv: Option<&[u8]>) -> Result<Arc<dyn CipherProcessor>, ToolError> {
    let fish = Threefish::new(args.block_size, material)?;
    debug!("threefish-{} ready, mode {:?}, {} threads", args.block_size.bits(), args.mode, args.threads);

    let processor = fish.processor(iv, args.threads)?;
    Ok(processor)
}

fn get_args() -> Result<Args, CipherError> {
    let matches = Command::new("Threefish")
        .about("Cipher and decipher files with the Threefish block cipher (ECB or CBC)")
        .arg(Arg::new("decipher")
            .short('d')
            .long("decipher")
            .action(ArgAction::SetTrue)
            .help("Decipher the source instead of ciphering it"))
        .arg(Arg::new("generate")
            .short('g')
            .long("generate")
            .action(ArgAction::SetTrue)
            .conflicts_with("decipher")
            .help("Generate random key material (and IV in CBC mode) into the --key/--iv paths"))
        .arg(Arg::new("block-size")
            .short('b')
            .long("block-size")
            .value_parser(["256", "512", "1024"])
            .default_value("256")
            .help("Block size in bits. Default: 256"))
        .arg(Arg::new("mode")
            .short('m')
            .long("mode")
            .value_parser(["ecb", "cbc"])
            .default_value("ecb")
            .help("Cipher mode. Default: ecb"))
        .arg(Arg::new("key")
            .short('k')
            .long("key")
            .num_args(1)
            .required(true)
            .help("Key material file: key followed by two 8-byte tweak words"))
        .arg(Arg::new("iv")
            .short('i')
            .long("iv")
            .num_args(1)
            .required_if_eq("mode", "cbc")
            .help("Initialization vector file, one block long"))
        .arg(Arg::new("threads")
            .short('T')
            .long("threads")
            .value_parser(clap::value_parser!(u32))
            .default_value("4")
            .help("Number of threads. Default: 4"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .num_args(1)
            .required(true)
            .help("Path where the result is written"))
        .arg(Arg::new("source")
            .short('s')
            .long("source")
            .num_args(1)
            .required(true)
            .help("Path of the file to read"))
        .get_matches();

    let bits: usize = matches.get_one::<String>("block-size")
        .map(|s| s.parse().unwrap_or(0))
        .unwrap_or(256);
    let block_size = BlockSize::from_bits(bits)?;

    let mode = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("cbc") => Mode::Cbc,
        _ => Mode::Ecb,
    };

    let path = |id: &str| matches.get_one::<String>(id).map(PathBuf::from);

    Ok(Args {
        decipher: matches.get_flag("decipher"),
        generate: matches.get_flag("generate"),
        block_size,
        mode,
        threads: *matches.get_one::<u32>("threads").unwrap_or(&4) as usize,
        key: path("key").unwrap_or_default(),
        iv: if mode == Mode::Cbc { path("iv") } else { None },
        output: path("output").unwrap_or_default(),
        source: path("source").unwrap_or_default(),
    })
}

fn run(args: &Args) -> Result<(), ToolError> {
    let (material, iv) = load_secrets(args)?;
    let processor = get_processor(args, &material, iv.as_deref())?;

    let data = read_file(&args.source)?;
    info!("read {} bytes from {}", data.len(), args.source.display());

    let result = if args.decipher {
        println!("Started decipher process...");
        processor.decrypt_blocks(&data)?
    } else {
        println!("Started cipher process...");
        processor.encrypt_blocks(&data)?
    };

    write_file(&args.output, &result)?;
    info!("wrote {} bytes to {}", result.len(), args.output.display());

    Ok(())
}

fn main() {
    env_logger::init();

    let args = match get_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    match run(&args) {
        Ok(_) => {}
        Err(ToolError::Cipher(CipherError::InvalidPaddingSize)) if args.decipher => {
            eprintln!("Error while deciphering. Maybe your key or IV is incorrect!");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    println!("Process done!");
}
