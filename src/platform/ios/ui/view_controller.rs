//! `VehicleViewController`: the single screen of the app.
//!
//! A UIViewController subclass whose view is an `ARSCNView` and which acts
//! as that view's renderer delegate. It owns the session's
//! [`VehicleController`] (boxed, in an ivar) and a [`TouchHandler`] for the
//! UIKit touch callbacks.
//!
//! Threads: touches, buttons and accelerometer updates arrive on the main
//! thread and only touch the shared atomics or the event bus. Renderer
//! callbacks arrive on SceneKit's render queue, one at a time, and are the
//! only code that uses the controller after `viewDidLoad`.

use std::ffi::c_void;

use objc2::runtime::AnyProtocol;
use tracing::{error, info};

use crate::app::VehicleController;
use crate::events::{self, AppEvent};
use crate::input::TouchHandler;
use crate::model::DriveConfig;
use crate::platform::ios::ffi::bridge::*;
use crate::platform::ios::input::start_accelerometer;
use crate::platform::ios::scene::SceneKitHost;
use crate::scene::{AnchorId, TrackedAnchor};

type Controller = VehicleController<SceneKitHost>;

const CLASS_NAME: &std::ffi::CStr = c"VehicleViewController";

const UI_BUTTON_TYPE_SYSTEM: NSInteger = 1;
const UI_CONTROL_STATE_NORMAL: NSUInteger = 0;
const UI_CONTROL_EVENT_TOUCH_UP_INSIDE: NSUInteger = 1 << 6;
const UI_VIEW_AUTORESIZING_FLEXIBLE_WIDTH: NSUInteger = 1 << 1;
const UI_VIEW_AUTORESIZING_FLEXIBLE_HEIGHT: NSUInteger = 1 << 4;
const UI_VIEW_AUTORESIZING_FLEXIBLE_TOP_MARGIN: NSUInteger = 1 << 3;
const AR_PLANE_DETECTION_HORIZONTAL: NSUInteger = 1;

const BUTTON_WIDTH: CGFloat = 120.0;
const BUTTON_HEIGHT: CGFloat = 44.0;
const BUTTON_MARGIN: CGFloat = 24.0;

/// Register the view controller class (once) and return it.
pub fn view_controller_class() -> Option<&'static AnyClass> {
    if let Some(cls) = AnyClass::get(CLASS_NAME) {
        return Some(cls);
    }
    let superclass = class(c"UIViewController")?;
    let mut builder = ClassBuilder::new(CLASS_NAME, superclass)?;

    unsafe {
        register_ivars(&mut builder);
        register_methods(&mut builder);
    }
    if let Some(protocol) = AnyProtocol::get(c"ARSCNViewDelegate") {
        builder.add_protocol(protocol);
    }
    Some(builder.register())
}

unsafe fn register_ivars(builder: &mut ClassBuilder) {
    builder.add_ivar::<id>(c"_sceneView");
    builder.add_ivar::<id>(c"_motionManager"); // retained
    builder.add_ivar::<*mut c_void>(c"_controller"); // Box<Controller>
    builder.add_ivar::<*mut c_void>(c"_touches"); // Box<TouchHandler>
}

unsafe fn register_methods(builder: &mut ClassBuilder) {
    // Lifecycle
    builder.add_method(sel!(loadView), load_view as unsafe extern "C-unwind" fn(_, _));
    builder.add_method(sel!(viewDidLoad), view_did_load as unsafe extern "C-unwind" fn(_, _));
    builder.add_method(
        sel!(viewWillAppear:),
        view_will_appear as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(viewWillDisappear:),
        view_will_disappear as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(sel!(dealloc), dealloc as unsafe extern "C-unwind" fn(_, _));

    // Touches
    builder.add_method(
        sel!(touchesBegan:withEvent:),
        touches_began as unsafe extern "C-unwind" fn(_, _, _, _),
    );
    builder.add_method(
        sel!(touchesEnded:withEvent:),
        touches_ended as unsafe extern "C-unwind" fn(_, _, _, _),
    );

    // Buttons
    builder.add_method(sel!(addCar:), add_car as unsafe extern "C-unwind" fn(_, _, _));
    builder.add_method(sel!(sendData:), send_data as unsafe extern "C-unwind" fn(_, _, _));

    // ARSCNViewDelegate / SCNSceneRendererDelegate
    builder.add_method(
        sel!(renderer:didAddNode:forAnchor:),
        did_add_node as unsafe extern "C-unwind" fn(_, _, _, _, _),
    );
    builder.add_method(
        sel!(renderer:didUpdateNode:forAnchor:),
        did_update_node as unsafe extern "C-unwind" fn(_, _, _, _, _),
    );
    builder.add_method(
        sel!(renderer:didRemoveNode:forAnchor:),
        did_remove_node as unsafe extern "C-unwind" fn(_, _, _, _, _),
    );
    builder.add_method(
        sel!(renderer:didSimulatePhysicsAtTime:),
        did_simulate_physics as unsafe extern "C-unwind" fn(_, _, _, _),
    );
}

// ============================================================================
// Ivar access
// ============================================================================

unsafe fn scene_view(this: &AnyObject) -> id {
    this.load_ivar::<id>(c"_sceneView").copied().unwrap_or(nil)
}

unsafe fn controller(this: &AnyObject) -> Option<&mut Controller> {
    let ptr = *this.load_ivar::<*mut c_void>(c"_controller")?;
    (ptr as *mut Controller).as_mut()
}

unsafe fn touch_handler(this: &AnyObject) -> Option<&TouchHandler> {
    let ptr = *this.load_ivar::<*mut c_void>(c"_touches")?;
    (ptr as *const TouchHandler).as_ref()
}

// ============================================================================
// Lifecycle
// ============================================================================

unsafe extern "C-unwind" fn load_view(this: &mut AnyObject, _cmd: Sel) {
    let Some(view_class) = class(c"ARSCNView") else {
        error!("ARSCNView not available");
        return;
    };
    let zero = CGRect::new(CGPoint::new(0.0, 0.0), CGSize::new(0.0, 0.0));
    let view: id = msg_send![view_class, alloc];
    let view: id = msg_send![view, initWithFrame: zero];
    let _: () = msg_send![
        view,
        setAutoresizingMask: UI_VIEW_AUTORESIZING_FLEXIBLE_WIDTH
            | UI_VIEW_AUTORESIZING_FLEXIBLE_HEIGHT
    ];
    let _: () = msg_send![&*this, setView: view];
    // The controller's view property holds its own reference
    let _: () = msg_send![view, release];
    this.store_ivar::<id>(c"_sceneView", view);
}

unsafe extern "C-unwind" fn view_did_load(this: &mut AnyObject, _cmd: Sel) {
    if let Some(superclass) = class(c"UIViewController") {
        let _: () = msg_send![super(&*this, superclass), viewDidLoad];
    }

    let view = scene_view(this);
    if view.is_null() {
        return;
    }
    if let Some(scene_class) = class(c"SCNScene") {
        let scene: id = msg_send![scene_class, scene];
        let _: () = msg_send![view, setScene: scene];
    }
    let _: () = msg_send![view, setDelegate: &*this];
    let _: () = msg_send![view, setShowsStatistics: YES];
    let _: () = msg_send![
        view,
        setDebugOptions: ARSCNDebugOptionShowWorldOrigin | ARSCNDebugOptionShowFeaturePoints
    ];

    let controller = Controller::new(SceneKitHost::new(view), DriveConfig::default());
    let touches = controller.touch_handler();
    let motion = controller.motion_handler();
    this.store_ivar::<*mut c_void>(c"_touches", Box::into_raw(Box::new(touches)) as *mut c_void);
    this.store_ivar::<*mut c_void>(
        c"_controller",
        Box::into_raw(Box::new(controller)) as *mut c_void,
    );

    if let Some(manager) = start_accelerometer(motion) {
        this.store_ivar::<id>(c"_motionManager", Retained::into_raw(manager));
    }

    add_button(this, view, "Add Car", sel!(addCar:), 0);
    add_button(this, view, "Send", sel!(sendData:), 1);
    info!("View controller loaded");
}

/// Pin a system button to the bottom edge, `slot` counting from the left.
unsafe fn add_button(this: &AnyObject, view: id, title: &str, action: Sel, slot: usize) {
    let Some(button_class) = class(c"UIButton") else {
        return;
    };
    let bounds: CGRect = msg_send![view, bounds];
    let x = BUTTON_MARGIN + slot as CGFloat * (BUTTON_WIDTH + BUTTON_MARGIN);
    let y = bounds.size.height - BUTTON_HEIGHT - BUTTON_MARGIN;
    let frame = CGRect::new(CGPoint::new(x, y), CGSize::new(BUTTON_WIDTH, BUTTON_HEIGHT));

    let button: id = msg_send![button_class, buttonWithType: UI_BUTTON_TYPE_SYSTEM];
    let title = nsstring(title);
    let _: () = msg_send![button, setTitle: &*title, forState: UI_CONTROL_STATE_NORMAL];
    let _: () = msg_send![button, setFrame: frame];
    let _: () = msg_send![
        button,
        setAutoresizingMask: UI_VIEW_AUTORESIZING_FLEXIBLE_TOP_MARGIN
    ];
    let _: () = msg_send![
        button,
        addTarget: this,
        action: action,
        forControlEvents: UI_CONTROL_EVENT_TOUCH_UP_INSIDE
    ];
    let _: () = msg_send![view, addSubview: button];
}

unsafe extern "C-unwind" fn view_will_appear(this: &mut AnyObject, _cmd: Sel, animated: Bool) {
    if let Some(superclass) = class(c"UIViewController") {
        let _: () = msg_send![super(&*this, superclass), viewWillAppear: animated];
    }
    let view = scene_view(this);
    let Some(config_class) = class(c"ARWorldTrackingConfiguration") else {
        error!("World tracking not available");
        return;
    };
    if view.is_null() {
        return;
    }
    let configuration: id = msg_send![config_class, new];
    let _: () = msg_send![configuration, setPlaneDetection: AR_PLANE_DETECTION_HORIZONTAL];
    let session: id = msg_send![view, session];
    let _: () = msg_send![session, runWithConfiguration: configuration];
    let _: () = msg_send![configuration, release];
    info!("AR session running");
}

unsafe extern "C-unwind" fn view_will_disappear(this: &mut AnyObject, _cmd: Sel, animated: Bool) {
    if let Some(superclass) = class(c"UIViewController") {
        let _: () = msg_send![super(&*this, superclass), viewWillDisappear: animated];
    }
    let view = scene_view(this);
    if !view.is_null() {
        let session: id = msg_send![view, session];
        let _: () = msg_send![session, pause];
    }
}

unsafe extern "C-unwind" fn dealloc(this: &mut AnyObject, _cmd: Sel) {
    if let Some(&manager) = this.load_ivar::<id>(c"_motionManager") {
        if !manager.is_null() {
            let _: () = msg_send![manager, stopAccelerometerUpdates];
            drop(Retained::from_raw(manager));
        }
    }
    if let Some(&ptr) = this.load_ivar::<*mut c_void>(c"_controller") {
        if !ptr.is_null() {
            drop(Box::from_raw(ptr as *mut Controller));
        }
    }
    if let Some(&ptr) = this.load_ivar::<*mut c_void>(c"_touches") {
        if !ptr.is_null() {
            drop(Box::from_raw(ptr as *mut TouchHandler));
        }
    }
    if let Some(superclass) = class(c"UIViewController") {
        let _: () = msg_send![super(&*this, superclass), dealloc];
    }
}

// ============================================================================
// Touches and buttons
// ============================================================================

unsafe fn touch_count(touches: id) -> usize {
    if touches.is_null() {
        return 0;
    }
    msg_send![touches, count]
}

unsafe extern "C-unwind" fn touches_began(this: &mut AnyObject, _cmd: Sel, touches: id, _event: id) {
    if let Some(handler) = touch_handler(this) {
        handler.touches_began(touch_count(touches));
    }
}

unsafe extern "C-unwind" fn touches_ended(this: &mut AnyObject, _cmd: Sel, touches: id, _event: id) {
    if let Some(handler) = touch_handler(this) {
        handler.touches_ended(touch_count(touches));
    }
}

unsafe extern "C-unwind" fn add_car(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    events::publish(AppEvent::SpawnVehicle);
}

unsafe extern "C-unwind" fn send_data(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    events::publish(AppEvent::SendTelemetry);
}

// ============================================================================
// Renderer delegate
// ============================================================================

unsafe fn tracked(controller: &mut Controller, node: id, anchor: id) -> TrackedAnchor {
    match controller.host_mut().track_anchor(node, anchor) {
        Some(plane) => TrackedAnchor::Plane(plane),
        None => TrackedAnchor::Other(AnchorId(node as usize as u64)),
    }
}

unsafe extern "C-unwind" fn did_add_node(
    this: &mut AnyObject,
    _cmd: Sel,
    _renderer: id,
    node: id,
    anchor: id,
) {
    if let Some(controller) = controller(this) {
        let anchor = tracked(controller, node, anchor);
        controller.anchor_added(&anchor);
    }
}

unsafe extern "C-unwind" fn did_update_node(
    this: &mut AnyObject,
    _cmd: Sel,
    _renderer: id,
    node: id,
    anchor: id,
) {
    if let Some(controller) = controller(this) {
        let anchor = tracked(controller, node, anchor);
        controller.anchor_updated(&anchor);
    }
}

unsafe extern "C-unwind" fn did_remove_node(
    this: &mut AnyObject,
    _cmd: Sel,
    _renderer: id,
    node: id,
    anchor: id,
) {
    if let Some(controller) = controller(this) {
        let anchor = tracked(controller, node, anchor);
        controller.anchor_removed(&anchor);
        controller.host_mut().forget_anchor(anchor.id());
    }
}

unsafe extern "C-unwind" fn did_simulate_physics(
    this: &mut AnyObject,
    _cmd: Sel,
    _renderer: id,
    time: f64,
) {
    if let Some(controller) = controller(this) {
        controller.physics_tick(time, events::drain_events());
    }
}
