//! Default file-system layout
//!
//! Seeds a fresh [`FileSystem`] with the system, user and temp trees, the
//! device and network descriptor files and one program file per built-in
//! command. The current directory starts at the home directory.

use crate::entity::{split_file_name, Entity};
use crate::programs::{PROGRAMS, PROGRAMS_PATH};
use crate::tree::{FileSystem, TreeError};
use core_types::{EntityId, PermissionSet};

/// Path of the colour config file, relative to the root
pub const COLOR_CONFIG_PATH: &str = "system/config/color.conf";

/// Path of the user config file, relative to the root
pub const USER_CONFIG_PATH: &str = "users/user/config/user.conf";

/// Directory of hardware descriptor subdirectories, relative to the root
pub const DEVICE_PATH: &str = "system/device";

/// Directory of network descriptor files, relative to the root
pub const NETWORK_PATH: &str = "system/network";

const COLOR_CONFIG: &str =
    "green:377a1c\nblue:1c387a\nteal:1c677a\npurple:5e1c7a\norange:7a2f1c\nred:7a1c38";

const USER_CONFIG: &str = "volume:100";

const WELCOME_MAIL: &str = "This is a mail file in Terminal OS. Welcome!";

const DEVICES: &[(&str, &[&str])] = &[
    (
        "display",
        &["name:Monitor\nmanufacturer:Display Bois\nh_resolution:1920\nv_resolution:1200"],
    ),
    (
        "input",
        &["name:USB\nmanufacturer:FlashDrive Inc.\nsize:34359738368\nremaining:28154768992"],
    ),
    (
        "memory",
        &[
            "name:L1CACHE\nmanufacturer:Notel\nsize:32768\nremaining:32768",
            "name:L2CACHE\nmanufacturer:Notel\nsize:6291456\nremaining:6291456",
            "name:DDR2\nmanufacturer:Memory Guys\nsize:1073741824\nremaining:855253756",
            "name:DDR2\nmanufacturer:Memory Guys\nsize:1073741824\nremaining:913745724",
        ],
    ),
    (
        "processor",
        &["name:CPU\nmanufacturer:Notel\ncores:8\nspeed:2.2Ghz"],
    ),
    (
        "storage",
        &[
            "name:SSD.M2\nmanufacturer:SolidStateTech\nsize:2199023255552\nremaining:1949015253411",
            "name:SSD.M2\nmanufacturer:SolidStateTech\nsize:2199023255552\nremaining:2016489954243",
        ],
    ),
];

const NETWORKS: &[(&str, &str)] = &[
    (
        "ethernet",
        "device:eth-0\ncapacity:1073741824\nactive:true\nipv6:2bae::a93c::dd1e::8ane\nipv8:zEw-F_92!#2A3(3j",
    ),
    (
        "loopback",
        "device:local-0\ncapacity:0\nactive:true\nipv6:fe02::29aa::39ba::f12e\nipv8:a!9v(J#M8W*E3@inld",
    ),
];

/// Builds the default file system
pub fn bootstrap() -> Result<FileSystem, TreeError> {
    let mut fs = FileSystem::new(PermissionSet::user_read());
    let root = fs.root_id();

    let system = add_directory(&mut fs, root, "system", PermissionSet::user_read())?;
    let users = add_directory(&mut fs, root, "users", PermissionSet::user_read())?;
    let temp = add_directory(&mut fs, root, "temp", PermissionSet::user_read())?;

    let config = add_directory(&mut fs, system, "config", PermissionSet::user_read())?;
    add_file(
        &mut fs,
        config,
        "color.conf",
        COLOR_CONFIG,
        PermissionSet::user_read_write(),
    )?;

    let device = add_directory(&mut fs, system, "device", PermissionSet::user_read())?;
    for (kind, descriptors) in DEVICES {
        let directory = add_directory(&mut fs, device, kind, PermissionSet::user_read())?;
        for (index, descriptor) in descriptors.iter().enumerate() {
            add_file(
                &mut fs,
                directory,
                &index.to_string(),
                descriptor,
                PermissionSet::user_read(),
            )?;
        }
    }

    add_directory(&mut fs, system, "logs", PermissionSet::user_read())?;

    let network = add_directory(&mut fs, system, "network", PermissionSet::user_read())?;
    for (name, descriptor) in NETWORKS {
        add_file(
            &mut fs,
            network,
            name,
            descriptor,
            PermissionSet::admin_read_write(),
        )?;
    }

    let programs = add_directory(&mut fs, system, "programs", PermissionSet::user_read())?;
    for program in PROGRAMS {
        add_file(
            &mut fs,
            programs,
            program.name,
            &program.contents(),
            PermissionSet::user_executable(),
        )?;
    }

    add_directory(&mut fs, temp, "logs", PermissionSet::user_read())?;

    let user = add_directory(&mut fs, users, "user", PermissionSet::user_read_write())?;
    let user_config = add_directory(&mut fs, user, "config", PermissionSet::user_read_write())?;
    add_file(
        &mut fs,
        user_config,
        "user.conf",
        USER_CONFIG,
        PermissionSet::user_read_write(),
    )?;

    let home = add_directory(&mut fs, user, "home", PermissionSet::user_read_write())?;
    let mail = add_directory(&mut fs, home, "mail", PermissionSet::user_read_write())?;
    add_file(
        &mut fs,
        mail,
        "welcome-to-terminal-os.mail",
        WELCOME_MAIL,
        PermissionSet::user_read_write(),
    )?;

    add_directory(&mut fs, user, "programs", PermissionSet::user_read_write())?;

    fs.set_current_directory(home);
    log::debug!(
        "bootstrapped file system with {} entities ({} programs under /{})",
        fs.len(),
        PROGRAMS.len(),
        PROGRAMS_PATH
    );

    Ok(fs)
}

fn add_directory(
    fs: &mut FileSystem,
    parent: EntityId,
    name: &str,
    permissions: PermissionSet,
) -> Result<EntityId, TreeError> {
    fs.insert(parent, Entity::directory(name, parent, permissions))
}

fn add_file(
    fs: &mut FileSystem,
    parent: EntityId,
    file_name: &str,
    contents: &str,
    permissions: PermissionSet,
) -> Result<EntityId, TreeError> {
    let (name, extension) = split_file_name(file_name);
    fs.insert(
        parent,
        Entity::file(name, extension, contents, parent, permissions),
    )
}
