use std::fmt;

use serde::Serialize;

use super::key::{TargetFamily, TargetId, UnknownTargetError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticLinkSupport {
    Full,
    Partial,
    None,
}

impl fmt::Display for StaticLinkSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            StaticLinkSupport::Full => "full",
            StaticLinkSupport::Partial => "partial",
            StaticLinkSupport::None => "none",
        };
        f.write_str(value)
    }
}

/// Compiler, binutils and search-path settings for one target.
///
/// Compiler entries are argv prefixes: the first element is the executable and
/// any remaining elements are flags that must always accompany it (for example
/// `--target=` and `--sysroot=` for a bare clang).
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ToolchainProfile {
    pub compiler_c: &'static [&'static str],
    pub compiler_cxx: &'static [&'static str],
    pub archiver: &'static str,
    pub ranlib: &'static str,
    pub strip_tool: &'static str,
    pub sysroot: Option<&'static str>,
    pub sysroot_pkg_config_path: &'static [&'static str],
    pub static_link_support: StaticLinkSupport,
    pub default_linker_flags: &'static [&'static str],
    pub default_compile_flags: &'static [&'static str],
    pub cmake_system_name: &'static str,
    pub cmake_system_processor: &'static str,
    pub gnu_host_triple: &'static str,
}

impl ToolchainProfile {
    pub fn compiler_c_command(&self) -> String {
        self.compiler_c.join(" ")
    }

    pub fn compiler_cxx_command(&self) -> String {
        self.compiler_cxx.join(" ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetAvailability {
    Native(&'static ToolchainProfile),
    /// No dedicated toolchain is installed; the substitute's tools are used instead.
    Aliased { substitute: TargetId },
}

pub struct TargetDescriptor {
    pub id: TargetId,
    pub key_str: &'static str,
    pub family: TargetFamily,
    pub availability: TargetAvailability,
}

impl TargetDescriptor {
    pub fn profile(&self) -> &'static ToolchainProfile {
        match self.availability {
            TargetAvailability::Native(profile) => profile,
            TargetAvailability::Aliased { substitute } => substitute.descriptor().profile(),
        }
    }
}

const OPT_FLAGS: &[&str] = &["-O2"];
const NO_FLAGS: &[&str] = &[];
const LLD_FLAGS: &[&str] = &["-fuse-ld=lld"];

static LINUX_AMD64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cross/x86_64-linux-musl/bin/x86_64-linux-musl-gcc"],
    compiler_cxx: &["/opt/cross/x86_64-linux-musl/bin/x86_64-linux-musl-g++"],
    archiver: "/opt/cross/x86_64-linux-musl/bin/x86_64-linux-musl-ar",
    ranlib: "/opt/cross/x86_64-linux-musl/bin/x86_64-linux-musl-ranlib",
    strip_tool: "/opt/cross/x86_64-linux-musl/bin/x86_64-linux-musl-strip",
    sysroot: Some("/opt/cross/x86_64-linux-musl/x86_64-linux-musl"),
    sysroot_pkg_config_path: &["/opt/cross/x86_64-linux-musl/x86_64-linux-musl/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Linux",
    cmake_system_processor: "x86_64",
    gnu_host_triple: "x86_64-linux-musl",
};

static LINUX_ARM64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cross/aarch64-linux-musl/bin/aarch64-linux-musl-gcc"],
    compiler_cxx: &["/opt/cross/aarch64-linux-musl/bin/aarch64-linux-musl-g++"],
    archiver: "/opt/cross/aarch64-linux-musl/bin/aarch64-linux-musl-ar",
    ranlib: "/opt/cross/aarch64-linux-musl/bin/aarch64-linux-musl-ranlib",
    strip_tool: "/opt/cross/aarch64-linux-musl/bin/aarch64-linux-musl-strip",
    sysroot: Some("/opt/cross/aarch64-linux-musl/aarch64-linux-musl"),
    sysroot_pkg_config_path: &["/opt/cross/aarch64-linux-musl/aarch64-linux-musl/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Linux",
    cmake_system_processor: "aarch64",
    gnu_host_triple: "aarch64-linux-musl",
};

static LINUX_ARMV7: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cross/armv7l-linux-musleabihf/bin/armv7l-linux-musleabihf-gcc"],
    compiler_cxx: &["/opt/cross/armv7l-linux-musleabihf/bin/armv7l-linux-musleabihf-g++"],
    archiver: "/opt/cross/armv7l-linux-musleabihf/bin/armv7l-linux-musleabihf-ar",
    ranlib: "/opt/cross/armv7l-linux-musleabihf/bin/armv7l-linux-musleabihf-ranlib",
    strip_tool: "/opt/cross/armv7l-linux-musleabihf/bin/armv7l-linux-musleabihf-strip",
    sysroot: Some("/opt/cross/armv7l-linux-musleabihf/armv7l-linux-musleabihf"),
    sysroot_pkg_config_path: &[
        "/opt/cross/armv7l-linux-musleabihf/armv7l-linux-musleabihf/lib/pkgconfig",
    ],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Linux",
    cmake_system_processor: "armv7",
    gnu_host_triple: "armv7l-linux-musleabihf",
};

static LINUX_386: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cross/i686-linux-musl/bin/i686-linux-musl-gcc"],
    compiler_cxx: &["/opt/cross/i686-linux-musl/bin/i686-linux-musl-g++"],
    archiver: "/opt/cross/i686-linux-musl/bin/i686-linux-musl-ar",
    ranlib: "/opt/cross/i686-linux-musl/bin/i686-linux-musl-ranlib",
    strip_tool: "/opt/cross/i686-linux-musl/bin/i686-linux-musl-strip",
    sysroot: Some("/opt/cross/i686-linux-musl/i686-linux-musl"),
    sysroot_pkg_config_path: &["/opt/cross/i686-linux-musl/i686-linux-musl/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Linux",
    cmake_system_processor: "i686",
    gnu_host_triple: "i686-linux-musl",
};

static LINUX_RISCV64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cross/riscv64-linux-musl/bin/riscv64-linux-musl-gcc"],
    compiler_cxx: &["/opt/cross/riscv64-linux-musl/bin/riscv64-linux-musl-g++"],
    archiver: "/opt/cross/riscv64-linux-musl/bin/riscv64-linux-musl-ar",
    ranlib: "/opt/cross/riscv64-linux-musl/bin/riscv64-linux-musl-ranlib",
    strip_tool: "/opt/cross/riscv64-linux-musl/bin/riscv64-linux-musl-strip",
    sysroot: Some("/opt/cross/riscv64-linux-musl/riscv64-linux-musl"),
    sysroot_pkg_config_path: &["/opt/cross/riscv64-linux-musl/riscv64-linux-musl/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Linux",
    cmake_system_processor: "riscv64",
    gnu_host_triple: "riscv64-linux-musl",
};

static LINUX_PPC64LE: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cross/powerpc64le-linux-musl/bin/powerpc64le-linux-musl-gcc"],
    compiler_cxx: &["/opt/cross/powerpc64le-linux-musl/bin/powerpc64le-linux-musl-g++"],
    archiver: "/opt/cross/powerpc64le-linux-musl/bin/powerpc64le-linux-musl-ar",
    ranlib: "/opt/cross/powerpc64le-linux-musl/bin/powerpc64le-linux-musl-ranlib",
    strip_tool: "/opt/cross/powerpc64le-linux-musl/bin/powerpc64le-linux-musl-strip",
    sysroot: Some("/opt/cross/powerpc64le-linux-musl/powerpc64le-linux-musl"),
    sysroot_pkg_config_path: &[
        "/opt/cross/powerpc64le-linux-musl/powerpc64le-linux-musl/lib/pkgconfig",
    ],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Linux",
    cmake_system_processor: "ppc64le",
    gnu_host_triple: "powerpc64le-linux-musl",
};

static LINUX_S390X: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cross/s390x-linux-musl/bin/s390x-linux-musl-gcc"],
    compiler_cxx: &["/opt/cross/s390x-linux-musl/bin/s390x-linux-musl-g++"],
    archiver: "/opt/cross/s390x-linux-musl/bin/s390x-linux-musl-ar",
    ranlib: "/opt/cross/s390x-linux-musl/bin/s390x-linux-musl-ranlib",
    strip_tool: "/opt/cross/s390x-linux-musl/bin/s390x-linux-musl-strip",
    sysroot: Some("/opt/cross/s390x-linux-musl/s390x-linux-musl"),
    sysroot_pkg_config_path: &["/opt/cross/s390x-linux-musl/s390x-linux-musl/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Linux",
    cmake_system_processor: "s390x",
    gnu_host_triple: "s390x-linux-musl",
};

static WINDOWS_AMD64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/llvm-mingw/bin/x86_64-w64-mingw32-clang"],
    compiler_cxx: &["/opt/llvm-mingw/bin/x86_64-w64-mingw32-clang++"],
    archiver: "/opt/llvm-mingw/bin/x86_64-w64-mingw32-ar",
    ranlib: "/opt/llvm-mingw/bin/x86_64-w64-mingw32-ranlib",
    strip_tool: "/opt/llvm-mingw/bin/x86_64-w64-mingw32-strip",
    sysroot: Some("/opt/llvm-mingw/x86_64-w64-mingw32"),
    sysroot_pkg_config_path: &["/opt/llvm-mingw/x86_64-w64-mingw32/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Windows",
    cmake_system_processor: "AMD64",
    gnu_host_triple: "x86_64-w64-mingw32",
};

static WINDOWS_386: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/llvm-mingw/bin/i686-w64-mingw32-clang"],
    compiler_cxx: &["/opt/llvm-mingw/bin/i686-w64-mingw32-clang++"],
    archiver: "/opt/llvm-mingw/bin/i686-w64-mingw32-ar",
    ranlib: "/opt/llvm-mingw/bin/i686-w64-mingw32-ranlib",
    strip_tool: "/opt/llvm-mingw/bin/i686-w64-mingw32-strip",
    sysroot: Some("/opt/llvm-mingw/i686-w64-mingw32"),
    sysroot_pkg_config_path: &["/opt/llvm-mingw/i686-w64-mingw32/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Windows",
    cmake_system_processor: "X86",
    gnu_host_triple: "i686-w64-mingw32",
};

static DARWIN_AMD64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/osxcross/target/bin/o64-clang"],
    compiler_cxx: &["/opt/osxcross/target/bin/o64-clang++"],
    archiver: "/opt/osxcross/target/bin/x86_64-apple-darwin23-ar",
    ranlib: "/opt/osxcross/target/bin/x86_64-apple-darwin23-ranlib",
    strip_tool: "/opt/osxcross/target/bin/x86_64-apple-darwin23-strip",
    sysroot: Some("/opt/osxcross/target/SDK/MacOSX14.0.sdk"),
    sysroot_pkg_config_path: &["/opt/osxcross/target/macports/pkgs/opt/local/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Partial,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: &["-O2", "-mmacosx-version-min=11.0"],
    cmake_system_name: "Darwin",
    cmake_system_processor: "x86_64",
    gnu_host_triple: "x86_64-apple-darwin23",
};

static DARWIN_ARM64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/osxcross/target/bin/oa64-clang"],
    compiler_cxx: &["/opt/osxcross/target/bin/oa64-clang++"],
    archiver: "/opt/osxcross/target/bin/aarch64-apple-darwin23-ar",
    ranlib: "/opt/osxcross/target/bin/aarch64-apple-darwin23-ranlib",
    strip_tool: "/opt/osxcross/target/bin/aarch64-apple-darwin23-strip",
    sysroot: Some("/opt/osxcross/target/SDK/MacOSX14.0.sdk"),
    sysroot_pkg_config_path: &["/opt/osxcross/target/macports/pkgs/opt/local/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Partial,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: &["-O2", "-mmacosx-version-min=11.0"],
    cmake_system_name: "Darwin",
    cmake_system_processor: "arm64",
    gnu_host_triple: "aarch64-apple-darwin23",
};

static FREEBSD_AMD64: ToolchainProfile = ToolchainProfile {
    compiler_c: &[
        "clang",
        "--target=x86_64-unknown-freebsd14",
        "--sysroot=/opt/sysroots/freebsd-amd64",
    ],
    compiler_cxx: &[
        "clang++",
        "--target=x86_64-unknown-freebsd14",
        "--sysroot=/opt/sysroots/freebsd-amd64",
    ],
    archiver: "llvm-ar",
    ranlib: "llvm-ranlib",
    strip_tool: "llvm-strip",
    sysroot: Some("/opt/sysroots/freebsd-amd64"),
    sysroot_pkg_config_path: &[
        "/opt/sysroots/freebsd-amd64/usr/local/libdata/pkgconfig",
        "/opt/sysroots/freebsd-amd64/usr/libdata/pkgconfig",
    ],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: LLD_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "FreeBSD",
    cmake_system_processor: "amd64",
    gnu_host_triple: "x86_64-unknown-freebsd14",
};

static FREEBSD_ARM64: ToolchainProfile = ToolchainProfile {
    compiler_c: &[
        "clang",
        "--target=aarch64-unknown-freebsd14",
        "--sysroot=/opt/sysroots/freebsd-arm64",
    ],
    compiler_cxx: &[
        "clang++",
        "--target=aarch64-unknown-freebsd14",
        "--sysroot=/opt/sysroots/freebsd-arm64",
    ],
    archiver: "llvm-ar",
    ranlib: "llvm-ranlib",
    strip_tool: "llvm-strip",
    sysroot: Some("/opt/sysroots/freebsd-arm64"),
    sysroot_pkg_config_path: &[
        "/opt/sysroots/freebsd-arm64/usr/local/libdata/pkgconfig",
        "/opt/sysroots/freebsd-arm64/usr/libdata/pkgconfig",
    ],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: LLD_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "FreeBSD",
    cmake_system_processor: "aarch64",
    gnu_host_triple: "aarch64-unknown-freebsd14",
};

static NETBSD_AMD64: ToolchainProfile = ToolchainProfile {
    compiler_c: &[
        "clang",
        "--target=x86_64-unknown-netbsd10",
        "--sysroot=/opt/sysroots/netbsd-amd64",
    ],
    compiler_cxx: &[
        "clang++",
        "--target=x86_64-unknown-netbsd10",
        "--sysroot=/opt/sysroots/netbsd-amd64",
    ],
    archiver: "llvm-ar",
    ranlib: "llvm-ranlib",
    strip_tool: "llvm-strip",
    sysroot: Some("/opt/sysroots/netbsd-amd64"),
    sysroot_pkg_config_path: &["/opt/sysroots/netbsd-amd64/usr/pkg/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: LLD_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "NetBSD",
    cmake_system_processor: "amd64",
    gnu_host_triple: "x86_64-unknown-netbsd10",
};

static OPENBSD_AMD64: ToolchainProfile = ToolchainProfile {
    compiler_c: &[
        "clang",
        "--target=x86_64-unknown-openbsd7",
        "--sysroot=/opt/sysroots/openbsd-amd64",
    ],
    compiler_cxx: &[
        "clang++",
        "--target=x86_64-unknown-openbsd7",
        "--sysroot=/opt/sysroots/openbsd-amd64",
    ],
    archiver: "llvm-ar",
    ranlib: "llvm-ranlib",
    strip_tool: "llvm-strip",
    sysroot: Some("/opt/sysroots/openbsd-amd64"),
    sysroot_pkg_config_path: &["/opt/sysroots/openbsd-amd64/usr/local/lib/pkgconfig"],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: LLD_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "OpenBSD",
    cmake_system_processor: "amd64",
    gnu_host_triple: "x86_64-unknown-openbsd7",
};

static ILLUMOS_AMD64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cross/x86_64-illumos/bin/x86_64-illumos-gcc"],
    compiler_cxx: &["/opt/cross/x86_64-illumos/bin/x86_64-illumos-g++"],
    archiver: "/opt/cross/x86_64-illumos/bin/x86_64-illumos-ar",
    ranlib: "/opt/cross/x86_64-illumos/bin/x86_64-illumos-ranlib",
    strip_tool: "/opt/cross/x86_64-illumos/bin/x86_64-illumos-strip",
    sysroot: Some("/opt/cross/x86_64-illumos/sysroot"),
    sysroot_pkg_config_path: &["/opt/cross/x86_64-illumos/sysroot/usr/lib/amd64/pkgconfig"],
    // libc on illumos is only shipped as a shared object.
    static_link_support: StaticLinkSupport::None,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "SunOS",
    cmake_system_processor: "x86_64",
    gnu_host_triple: "x86_64-pc-solaris2.11",
};

static ANDROID_ARM64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/aarch64-linux-android24-clang"],
    compiler_cxx: &["/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/aarch64-linux-android24-clang++"],
    archiver: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-ar",
    ranlib: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-ranlib",
    strip_tool: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-strip",
    sysroot: Some("/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/sysroot"),
    sysroot_pkg_config_path: &[],
    static_link_support: StaticLinkSupport::Partial,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: &["-O2", "-fPIC"],
    cmake_system_name: "Android",
    cmake_system_processor: "aarch64",
    gnu_host_triple: "aarch64-linux-android",
};

static ANDROID_ARMV7: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/armv7a-linux-androideabi24-clang"],
    compiler_cxx: &["/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/armv7a-linux-androideabi24-clang++"],
    archiver: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-ar",
    ranlib: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-ranlib",
    strip_tool: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-strip",
    sysroot: Some("/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/sysroot"),
    sysroot_pkg_config_path: &[],
    static_link_support: StaticLinkSupport::Partial,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: &["-O2", "-fPIC"],
    cmake_system_name: "Android",
    cmake_system_processor: "armv7-a",
    gnu_host_triple: "armv7a-linux-androideabi",
};

static ANDROID_AMD64: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/x86_64-linux-android24-clang"],
    compiler_cxx: &["/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/x86_64-linux-android24-clang++"],
    archiver: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-ar",
    ranlib: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-ranlib",
    strip_tool: "/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-strip",
    sysroot: Some("/opt/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/sysroot"),
    sysroot_pkg_config_path: &[],
    static_link_support: StaticLinkSupport::Partial,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: &["-O2", "-fPIC"],
    cmake_system_name: "Android",
    cmake_system_processor: "x86_64",
    gnu_host_triple: "x86_64-linux-android",
};

static WASI: ToolchainProfile = ToolchainProfile {
    compiler_c: &[
        "/opt/wasi-sdk/bin/clang",
        "--target=wasm32-wasip1",
        "--sysroot=/opt/wasi-sdk/share/wasi-sysroot",
    ],
    compiler_cxx: &[
        "/opt/wasi-sdk/bin/clang++",
        "--target=wasm32-wasip1",
        "--sysroot=/opt/wasi-sdk/share/wasi-sysroot",
    ],
    archiver: "/opt/wasi-sdk/bin/llvm-ar",
    ranlib: "/opt/wasi-sdk/bin/llvm-ranlib",
    strip_tool: "/opt/wasi-sdk/bin/llvm-strip",
    sysroot: Some("/opt/wasi-sdk/share/wasi-sysroot"),
    sysroot_pkg_config_path: &[],
    static_link_support: StaticLinkSupport::None,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "WASI",
    cmake_system_processor: "wasm32",
    gnu_host_triple: "wasm32-wasi",
};

static EMSCRIPTEN: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/emsdk/upstream/emscripten/emcc"],
    compiler_cxx: &["/opt/emsdk/upstream/emscripten/em++"],
    archiver: "/opt/emsdk/upstream/emscripten/emar",
    ranlib: "/opt/emsdk/upstream/emscripten/emranlib",
    strip_tool: "/opt/emsdk/upstream/bin/llvm-strip",
    sysroot: None,
    sysroot_pkg_config_path: &[],
    static_link_support: StaticLinkSupport::None,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Emscripten",
    cmake_system_processor: "wasm32",
    gnu_host_triple: "wasm32-unknown-emscripten",
};

static COSMO: ToolchainProfile = ToolchainProfile {
    compiler_c: &["/opt/cosmocc/bin/cosmocc"],
    compiler_cxx: &["/opt/cosmocc/bin/cosmoc++"],
    archiver: "/opt/cosmocc/bin/cosmoar",
    ranlib: "/opt/cosmocc/bin/x86_64-linux-cosmo-ranlib",
    strip_tool: "/opt/cosmocc/bin/x86_64-linux-cosmo-strip",
    sysroot: None,
    sysroot_pkg_config_path: &[],
    static_link_support: StaticLinkSupport::Full,
    default_linker_flags: NO_FLAGS,
    default_compile_flags: OPT_FLAGS,
    cmake_system_name: "Linux",
    cmake_system_processor: "x86_64",
    gnu_host_triple: "x86_64-linux-cosmo",
};

static TARGET_REGISTRY: &[TargetDescriptor] = &[
    TargetDescriptor {
        id: TargetId::LinuxAmd64,
        key_str: "linux-amd64",
        family: TargetFamily::Linux,
        availability: TargetAvailability::Native(&LINUX_AMD64),
    },
    TargetDescriptor {
        id: TargetId::LinuxArm64,
        key_str: "linux-arm64",
        family: TargetFamily::Linux,
        availability: TargetAvailability::Native(&LINUX_ARM64),
    },
    TargetDescriptor {
        id: TargetId::LinuxArmv7,
        key_str: "linux-armv7",
        family: TargetFamily::Linux,
        availability: TargetAvailability::Native(&LINUX_ARMV7),
    },
    TargetDescriptor {
        id: TargetId::Linux386,
        key_str: "linux-386",
        family: TargetFamily::Linux,
        availability: TargetAvailability::Native(&LINUX_386),
    },
    TargetDescriptor {
        id: TargetId::LinuxRiscv64,
        key_str: "linux-riscv64",
        family: TargetFamily::Linux,
        availability: TargetAvailability::Native(&LINUX_RISCV64),
    },
    TargetDescriptor {
        id: TargetId::LinuxPpc64le,
        key_str: "linux-ppc64le",
        family: TargetFamily::Linux,
        availability: TargetAvailability::Native(&LINUX_PPC64LE),
    },
    TargetDescriptor {
        id: TargetId::LinuxS390x,
        key_str: "linux-s390x",
        family: TargetFamily::Linux,
        availability: TargetAvailability::Native(&LINUX_S390X),
    },
    TargetDescriptor {
        id: TargetId::WindowsAmd64,
        key_str: "windows-amd64",
        family: TargetFamily::Windows,
        availability: TargetAvailability::Native(&WINDOWS_AMD64),
    },
    TargetDescriptor {
        id: TargetId::Windows386,
        key_str: "windows-386",
        family: TargetFamily::Windows,
        availability: TargetAvailability::Native(&WINDOWS_386),
    },
    TargetDescriptor {
        id: TargetId::WindowsArm64,
        key_str: "windows-arm64",
        family: TargetFamily::Windows,
        availability: TargetAvailability::Aliased {
            substitute: TargetId::WindowsAmd64,
        },
    },
    TargetDescriptor {
        id: TargetId::DarwinAmd64,
        key_str: "darwin-amd64",
        family: TargetFamily::Macos,
        availability: TargetAvailability::Native(&DARWIN_AMD64),
    },
    TargetDescriptor {
        id: TargetId::DarwinArm64,
        key_str: "darwin-arm64",
        family: TargetFamily::Macos,
        availability: TargetAvailability::Native(&DARWIN_ARM64),
    },
    TargetDescriptor {
        id: TargetId::FreebsdAmd64,
        key_str: "freebsd-amd64",
        family: TargetFamily::Bsd,
        availability: TargetAvailability::Native(&FREEBSD_AMD64),
    },
    TargetDescriptor {
        id: TargetId::FreebsdArm64,
        key_str: "freebsd-arm64",
        family: TargetFamily::Bsd,
        availability: TargetAvailability::Native(&FREEBSD_ARM64),
    },
    TargetDescriptor {
        id: TargetId::NetbsdAmd64,
        key_str: "netbsd-amd64",
        family: TargetFamily::Bsd,
        availability: TargetAvailability::Native(&NETBSD_AMD64),
    },
    TargetDescriptor {
        id: TargetId::OpenbsdAmd64,
        key_str: "openbsd-amd64",
        family: TargetFamily::Bsd,
        availability: TargetAvailability::Native(&OPENBSD_AMD64),
    },
    TargetDescriptor {
        id: TargetId::IllumosAmd64,
        key_str: "illumos-amd64",
        family: TargetFamily::Illumos,
        availability: TargetAvailability::Native(&ILLUMOS_AMD64),
    },
    TargetDescriptor {
        id: TargetId::AndroidArm64,
        key_str: "android-arm64",
        family: TargetFamily::Android,
        availability: TargetAvailability::Native(&ANDROID_ARM64),
    },
    TargetDescriptor {
        id: TargetId::AndroidArmv7,
        key_str: "android-armv7",
        family: TargetFamily::Android,
        availability: TargetAvailability::Native(&ANDROID_ARMV7),
    },
    TargetDescriptor {
        id: TargetId::AndroidAmd64,
        key_str: "android-amd64",
        family: TargetFamily::Android,
        availability: TargetAvailability::Native(&ANDROID_AMD64),
    },
    TargetDescriptor {
        id: TargetId::Wasi,
        key_str: "wasi",
        family: TargetFamily::Webassembly,
        availability: TargetAvailability::Native(&WASI),
    },
    TargetDescriptor {
        id: TargetId::Emscripten,
        key_str: "emscripten",
        family: TargetFamily::Webassembly,
        availability: TargetAvailability::Native(&EMSCRIPTEN),
    },
    TargetDescriptor {
        id: TargetId::Cosmo,
        key_str: "cosmo",
        family: TargetFamily::Universal,
        availability: TargetAvailability::Native(&COSMO),
    },
];

pub fn registry() -> &'static [TargetDescriptor] {
    TARGET_REGISTRY
}

/// All registered targets in listing order (grouped by family).
pub fn list_targets() -> Vec<TargetId> {
    registry().iter().map(|entry| entry.id).collect()
}

/// Targets grouped by family, preserving listing order within each group.
pub fn targets_by_family() -> Vec<(TargetFamily, Vec<TargetId>)> {
    let mut groups: Vec<(TargetFamily, Vec<TargetId>)> = Vec::new();
    for entry in registry() {
        match groups.last_mut() {
            Some((family, ids)) if *family == entry.family => ids.push(entry.id),
            _ => groups.push((entry.family, vec![entry.id])),
        }
    }
    groups
}

pub fn lookup(name: &str) -> Result<&'static ToolchainProfile, UnknownTargetError> {
    let id: TargetId = name.parse()?;
    Ok(id.descriptor().profile())
}
