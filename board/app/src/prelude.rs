use core::mem::MaybeUninit;

use embedded_alloc::Heap;

#[global_allocator]
static HEAP: Heap = Heap::empty();
/* 8k of the F103C8's 20k; the linker fails the build if .data + .bss + heap outgrow RAM */
const HEAP_SIZE: usize = 8 * 1024;
static mut HEAP_MEMORY: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];

// Initialize the allocator BEFORE you use it
fn alloc_heap() {
    unsafe { HEAP.init(core::ptr::addr_of_mut!(HEAP_MEMORY) as usize, HEAP_SIZE) }
}

pub(crate) fn init() {
    alloc_heap();
}
