#![allow(unsafe_code)]

//! Raw device control calls.
//!
//! This is the only module allowed to use `unsafe`. Each ioctl is wrapped in
//! a safe function taking a borrowed descriptor.

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};

use nix::{ioctl_none_bad, ioctl_read_bad, ioctl_write_int_bad};

const FBIOGET_VSCREENINFO: u32 = 0x4600;
const VCS_IOCTL_PUTCHAR: u32 = 101;
const VCS_IOCTL_CHANGE_CON: u32 = 107;
const VCS_IOCTL_UPDATE_SCR: u32 = 108;

/// `struct fb_var_screeninfo` from `<linux/fb.h>`.
///
/// Only the geometry fields are named; the rest is carried opaquely.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FbVarScreeninfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    rest: [u32; 33],
}

impl FbVarScreeninfo {
    const fn zeroed() -> Self {
        Self {
            xres: 0,
            yres: 0,
            xres_virtual: 0,
            yres_virtual: 0,
            xoffset: 0,
            yoffset: 0,
            bits_per_pixel: 0,
            rest: [0; 33],
        }
    }
}

ioctl_read_bad!(fbioget_vscreeninfo, FBIOGET_VSCREENINFO, FbVarScreeninfo);
ioctl_write_int_bad!(vcs_putchar, VCS_IOCTL_PUTCHAR);
ioctl_write_int_bad!(vcs_change_con, VCS_IOCTL_CHANGE_CON);
ioctl_none_bad!(vcs_update_scr, VCS_IOCTL_UPDATE_SCR);

/// Read the framebuffer's variable screen info.
pub fn screen_info(fd: BorrowedFd<'_>) -> io::Result<FbVarScreeninfo> {
    let mut info = FbVarScreeninfo::zeroed();
    // SAFETY: `info` is a live `fb_var_screeninfo` with the kernel's layout;
    // the call writes at most `size_of::<FbVarScreeninfo>()` bytes into it.
    unsafe { fbioget_vscreeninfo(fd.as_raw_fd(), &mut info) }?;
    Ok(info)
}

/// Inject one byte into the active virtual console.
pub fn put_char(fd: BorrowedFd<'_>, byte: u8) -> io::Result<()> {
    // SAFETY: the argument is passed by value; no memory is shared.
    unsafe { vcs_putchar(fd.as_raw_fd(), i32::from(byte)) }?;
    Ok(())
}

/// Switch to console `index`, or query the current one with `-1`.
///
/// Returns the driver's answer, which is negative on refusal.
pub fn change_console(fd: BorrowedFd<'_>, index: i32) -> io::Result<i32> {
    // SAFETY: the argument is passed by value; no memory is shared.
    let answer = unsafe { vcs_change_con(fd.as_raw_fd(), index) }?;
    Ok(answer)
}

/// Ask the console driver to repaint.
pub fn update_screen(fd: BorrowedFd<'_>) -> io::Result<()> {
    // SAFETY: the request takes no argument.
    unsafe { vcs_update_scr(fd.as_raw_fd()) }?;
    Ok(())
}
