//! Asset platform suffixes for the build target.
//!
//! Upstream encodes the platform in each asset filename after the remote
//! name, e.g. `Godot_v4.2.1-stable_linux.x86_64.zip` or
//! `Godot_v4.2.1-stable_mono_linux_x86_64.zip`. The accepted suffixes are
//! fixed at compile time for the target gdvm is built for. Older 3.x
//! releases use the `x11`/`osx` spellings, so those are listed as fallbacks.

/// Filename suffixes identifying the current platform's engine assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Human-readable platform name.
    pub name: &'static str,
    /// Suffixes of standard (non-mono) builds.
    pub standard: &'static [&'static str],
    /// Suffixes of mono builds.
    pub mono: &'static [&'static str],
}

impl Platform {
    /// Suffixes for the requested flavour.
    pub fn suffixes(&self, mono: bool) -> &'static [&'static str] {
        if mono { self.mono } else { self.standard }
    }
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
/// Platform gdvm was compiled for.
pub const CURRENT: Platform = Platform {
    name: "linux-x86_64",
    standard: &["linux.x86_64", "x11.64"],
    mono: &["linux_x86_64", "x11_64"],
};

#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
/// Platform gdvm was compiled for.
pub const CURRENT: Platform = Platform {
    name: "linux-arm64",
    standard: &["linux.arm64"],
    mono: &["linux_arm64"],
};

#[cfg(all(target_os = "linux", target_arch = "x86"))]
/// Platform gdvm was compiled for.
pub const CURRENT: Platform = Platform {
    name: "linux-x86_32",
    standard: &["linux.x86_32", "x11.32"],
    mono: &["linux_x86_32", "x11_32"],
};

#[cfg(all(target_os = "windows", target_arch = "x86_64"))]
/// Platform gdvm was compiled for.
pub const CURRENT: Platform = Platform {
    name: "windows-x86_64",
    standard: &["win64.exe"],
    mono: &["win64"],
};

#[cfg(all(target_os = "windows", target_arch = "aarch64"))]
/// Platform gdvm was compiled for.
pub const CURRENT: Platform = Platform {
    name: "windows-arm64",
    standard: &["windows_arm64.exe"],
    mono: &["windows_arm64"],
};

#[cfg(all(target_os = "windows", target_arch = "x86"))]
/// Platform gdvm was compiled for.
pub const CURRENT: Platform = Platform {
    name: "windows-x86_32",
    standard: &["win32.exe"],
    mono: &["win32"],
};

#[cfg(target_os = "macos")]
/// Platform gdvm was compiled for.
pub const CURRENT: Platform = Platform {
    name: "macos-universal",
    standard: &["macos.universal", "osx.universal", "osx.64"],
    mono: &["macos.universal", "osx.universal", "osx.64"],
};

// Upstream publishes no engine builds for other targets; every lookup
// resolves to "not found".
#[cfg(not(any(
    all(
        target_os = "linux",
        any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "x86")
    ),
    all(
        target_os = "windows",
        any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "x86")
    ),
    target_os = "macos"
)))]
/// Platform gdvm was compiled for.
pub const CURRENT: Platform = Platform {
    name: "unsupported",
    standard: &[],
    mono: &[],
};
