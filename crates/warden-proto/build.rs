//! Build script for compiling Protocol Buffer definitions with tonic.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_files = ["proto/warden/v1/user.proto"];

    // Fall back to the vendored protoc when none is configured
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }
    // Well-known types (google/protobuf/timestamp.proto)
    let includes = [
        std::path::PathBuf::from("proto"),
        protoc_bin_vendored::include_path()?,
    ];

    // Configure tonic-build
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        // Include file descriptors for reflection
        .file_descriptor_set_path(
            std::path::PathBuf::from(std::env::var("OUT_DIR")?).join("warden_descriptor.bin"),
        )
        .compile_protos(&proto_files, &includes)?;

    // Tell Cargo to rerun if protos change
    for proto in &proto_files {
        println!("cargo:rerun-if-changed={proto}");
    }

    Ok(())
}
