//! Application entry: registers an app delegate and hands control to UIKit.

use std::ffi::{c_char, c_int};

use tracing::error;

use super::ffi::bridge::*;
use super::ui::view_controller_class;

const DELEGATE_CLASS_NAME: &std::ffi::CStr = c"ArVehicleAppDelegate";

extern "C" {
    fn UIApplicationMain(
        argc: c_int,
        argv: *mut *mut c_char,
        principal_class_name: *const NSString,
        delegate_class_name: *const NSString,
    ) -> c_int;
}

/// Run the UIKit event loop. Only returns if UIKit does.
pub fn run() -> i32 {
    if app_delegate_class().is_none() || view_controller_class().is_none() {
        error!("Failed to register UIKit classes");
        return 1;
    }
    let delegate_name = nsstring(&DELEGATE_CLASS_NAME.to_string_lossy());
    unsafe {
        UIApplicationMain(
            0,
            std::ptr::null_mut(),
            std::ptr::null(),
            &*delegate_name as *const NSString,
        )
    }
}

fn app_delegate_class() -> Option<&'static AnyClass> {
    if let Some(cls) = AnyClass::get(DELEGATE_CLASS_NAME) {
        return Some(cls);
    }
    let superclass = class(c"UIResponder")?;
    let mut builder = ClassBuilder::new(DELEGATE_CLASS_NAME, superclass)?;
    builder.add_ivar::<id>(c"_window");
    unsafe {
        builder.add_method(
            sel!(application:didFinishLaunchingWithOptions:),
            did_finish_launching as unsafe extern "C-unwind" fn(_, _, _, _) -> _,
        );
        builder.add_method(sel!(window), window as unsafe extern "C-unwind" fn(_, _) -> _);
    }
    Some(builder.register())
}

unsafe extern "C-unwind" fn did_finish_launching(
    this: &mut AnyObject,
    _cmd: Sel,
    _application: id,
    _options: id,
) -> Bool {
    let (Some(window_class), Some(screen_class), Some(controller_class)) = (
        class(c"UIWindow"),
        class(c"UIScreen"),
        view_controller_class(),
    ) else {
        return NO;
    };

    let screen: id = msg_send![screen_class, mainScreen];
    let bounds: CGRect = msg_send![screen, bounds];
    let window: id = msg_send![window_class, alloc];
    let window: id = msg_send![window, initWithFrame: bounds];

    let controller: id = msg_send![controller_class, new];
    let _: () = msg_send![window, setRootViewController: controller];
    let _: () = msg_send![controller, release];
    let _: () = msg_send![window, makeKeyAndVisible];

    // Keeps the +1 from alloc for the app's lifetime
    this.store_ivar::<id>(c"_window", window);
    YES
}

unsafe extern "C-unwind" fn window(this: &mut AnyObject, _cmd: Sel) -> id {
    this.load_ivar::<id>(c"_window").copied().unwrap_or(nil)
}
